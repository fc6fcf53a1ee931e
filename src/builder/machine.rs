//! Builder for constructing state machines.

use crate::core::{Guard, State};
use crate::machine::{MachineObserver, Result, StateHooks, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// Unlike incremental registration on [`StateMachine`], `build()` sees the
/// whole configuration at once, so it also rejects transitions whose target
/// was never declared.
pub struct StateMachineBuilder<S: State, O> {
    initial: Option<S>,
    states: Vec<(S, StateHooks)>,
    transitions: Vec<(S, S, Guard<O>)>,
    observers: Vec<Box<dyn MachineObserver<S>>>,
}

impl<S: State + 'static, O> StateMachineBuilder<S, O> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// State to enter once the machine is built (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state without hooks.
    pub fn state(self, state: S) -> Self {
        self.state_with_hooks(state, StateHooks::new())
    }

    /// Declare a state with hooks.
    pub fn state_with_hooks(mut self, state: S, hooks: StateHooks) -> Self {
        self.states.push((state, hooks));
        self
    }

    /// Declare multiple hookless states at once.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states
            .extend(states.into_iter().map(|s| (s, StateHooks::new())));
        self
    }

    /// Declare a guarded transition using a closure.
    pub fn when<F>(self, from: S, to: S, predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.guard(from, to, Guard::new(predicate))
    }

    /// Declare a guarded transition using a prebuilt guard.
    pub fn guard(mut self, from: S, to: S, guard: Guard<O>) -> Self {
        self.transitions.push((from, to, guard));
        self
    }

    /// Attach an observer.
    pub fn observer<T>(mut self, observer: T) -> Self
    where
        T: MachineObserver<S> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the state machine.
    ///
    /// Registers everything in declaration order, validates transition
    /// targets, then enters the initial state if one was given.
    pub fn build(self) -> Result<StateMachine<S, O>> {
        let mut machine = StateMachine::new();
        for (state, hooks) in self.states {
            machine.add_state_with_hooks(state, hooks);
        }
        for (from, to, guard) in self.transitions {
            machine.add_transition_guard(from, to, guard)?;
        }
        for observer in self.observers {
            machine.add_boxed_observer(observer);
        }
        machine.validate()?;

        if let Some(initial) = self.initial {
            machine.set_state(initial)?;
        }
        Ok(machine)
    }
}

impl<S: State + 'static, O> Default for StateMachineBuilder<S, O> {
    fn default() -> Self {
        Self::new()
    }
}
