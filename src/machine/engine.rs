//! The guarded state machine engine.

use super::error::{HookPhase, MachineError, Result};
use super::hooks::StateHooks;
use super::observer::MachineObserver;
use crate::core::{Guard, State, StateHistory, StateTransition, TransitionTrigger};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Transitions a new machine retains before evicting the oldest.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Outcome of a single [`StateMachine::update`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S: State> {
    /// A guard matched and the machine moved.
    Transitioned { from: S, to: S },

    /// No guard matched; state and hooks untouched.
    Stayed,
}

impl<S: State> Step<S> {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

struct Candidate<S, O> {
    target: S,
    guard: Guard<O>,
}

struct StateEntry<S, O> {
    hooks: StateHooks,
    // Priority order: first registration wins ties.
    transitions: Vec<Candidate<S, O>>,
}

/// Single-active-state machine driven by caller-supplied observations.
///
/// States and transitions are registered up front; afterwards the owner
/// calls [`update`](Self::update) once per decision tick. At most one
/// transition fires per call: candidates are tried in registration order and
/// the first guard that holds wins.
///
/// The machine is synchronous and owned by exactly one caller. Hooks run
/// inline and have no access to the machine, so they cannot re-enter it.
///
/// # Example
///
/// ```rust
/// use brigade::chef::{ChefState, Observation};
/// use brigade::machine::{StateMachine, Step};
///
/// let mut machine: StateMachine<ChefState, Observation> = StateMachine::new();
/// machine.add_state(ChefState::Idle);
/// machine.add_state(ChefState::PrepareSoup);
/// machine
///     .add_transition(ChefState::Idle, ChefState::PrepareSoup, |obs: &Observation| {
///         !obs.orders.is_empty()
///     })
///     .unwrap();
///
/// assert_eq!(machine.get_state(), None);
/// machine.set_state(ChefState::Idle).unwrap();
///
/// let step = machine
///     .update(&Observation::new("empty", "counter", vec!["soup".to_string()]))
///     .unwrap();
/// assert!(step.is_transition());
/// assert_eq!(machine.get_state(), Some(&ChefState::PrepareSoup));
/// ```
pub struct StateMachine<S: State, O> {
    states: HashMap<S, StateEntry<S, O>>,
    registration_order: Vec<S>,
    current: Option<S>,
    history: StateHistory<S>,
    // Cumulative per-edge counts; unaffected by history eviction.
    edge_counts: HashMap<(S, S), usize>,
    ticks: u64,
    observers: Vec<Box<dyn MachineObserver<S>>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl<S: State, O> StateMachine<S, O> {
    /// Create an empty machine with no states and no current state.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            states: HashMap::new(),
            registration_order: Vec::new(),
            current: None,
            history: StateHistory::with_limit(DEFAULT_HISTORY_LIMIT),
            edge_counts: HashMap::new(),
            ticks: 0,
            observers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Register a state without hooks.
    ///
    /// See [`add_state_with_hooks`](Self::add_state_with_hooks) for the
    /// re-registration policy.
    pub fn add_state(&mut self, state: S) {
        self.add_state_with_hooks(state, StateHooks::new());
    }

    /// Register a state with entry/exit hooks.
    ///
    /// Registering a state that already exists replaces its hooks but does
    /// not reset it: outgoing transitions added earlier stay in place with
    /// their priority, and its position in [`states`](Self::states) is
    /// unchanged. To drop a state's transitions, build a new machine.
    pub fn add_state_with_hooks(&mut self, state: S, hooks: StateHooks) {
        match self.states.get_mut(&state) {
            Some(entry) => {
                tracing::debug!(state = state.name(), "replacing hooks of registered state");
                entry.hooks = hooks;
            }
            None => {
                self.registration_order.push(state.clone());
                self.states.insert(
                    state,
                    StateEntry {
                        hooks,
                        transitions: Vec::new(),
                    },
                );
            }
        }
    }

    /// Register a guarded transition from `from` to `to`.
    ///
    /// `from` must already be registered; `to` only has to exist by the time
    /// the transition is taken. Re-adding an existing `(from, to)` pair
    /// replaces its guard and keeps its original priority.
    pub fn add_transition<F>(&mut self, from: S, to: S, guard: F) -> Result<()>
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.add_transition_guard(from, to, Guard::new(guard))
    }

    /// Same as [`add_transition`](Self::add_transition) with a prebuilt [`Guard`].
    pub fn add_transition_guard(&mut self, from: S, to: S, guard: Guard<O>) -> Result<()> {
        let entry = self
            .states
            .get_mut(&from)
            .ok_or_else(|| MachineError::UnknownState {
                state: from.name().to_string(),
            })?;

        match entry.transitions.iter_mut().find(|c| c.target == to) {
            Some(existing) => existing.guard = guard,
            None => entry.transitions.push(Candidate { target: to, guard }),
        }
        Ok(())
    }

    /// Attach an observer. Observers are notified in attachment order.
    pub fn add_observer<T>(&mut self, observer: T)
    where
        T: MachineObserver<S> + 'static,
    {
        self.add_boxed_observer(Box::new(observer));
    }

    pub fn add_boxed_observer(&mut self, observer: Box<dyn MachineObserver<S>>) {
        self.observers.push(observer);
    }

    /// Force the machine into `state`, running lifecycle hooks.
    ///
    /// Runs the current state's `on_exit` (if a state is active), switches,
    /// then runs `state`'s `on_enter`. An unregistered `state` is rejected
    /// before any hook fires. A failing hook aborts the call without
    /// rollback: a failed `on_exit` leaves the old state active, a failed
    /// `on_enter` leaves the new one active.
    pub fn set_state(&mut self, state: S) -> Result<()> {
        self.change_state(state, TransitionTrigger::Forced)
    }

    /// Evaluate the current state's transitions against `observation`.
    ///
    /// Candidates are checked in registration order and the first matching
    /// guard fires. With no current state, or no match, nothing changes.
    pub fn update(&mut self, observation: &O) -> Result<Step<S>> {
        self.ticks += 1;
        self.updated_at = Utc::now();

        let target = self
            .current
            .as_ref()
            .and_then(|current| self.states.get(current))
            .and_then(|entry| {
                entry
                    .transitions
                    .iter()
                    .find(|candidate| candidate.guard.check(observation))
            })
            .map(|candidate| candidate.target.clone());

        let (Some(to), Some(from)) = (target, self.current.clone()) else {
            for observer in &self.observers {
                observer.on_idle_tick(self.current.as_ref(), self.ticks);
            }
            return Ok(Step::Stayed);
        };

        self.change_state(to.clone(), TransitionTrigger::Guard)?;
        Ok(Step::Transitioned { from, to })
    }

    /// Current active state, or `None` before the first `set_state`.
    pub fn get_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Check that every transition target is a registered state.
    pub fn validate(&self) -> Result<()> {
        for from in &self.registration_order {
            let Some(entry) = self.states.get(from) else {
                continue;
            };
            if let Some(dangling) = entry
                .transitions
                .iter()
                .find(|c| !self.states.contains_key(&c.target))
            {
                return Err(MachineError::UnknownTarget {
                    from: from.name().to_string(),
                    to: dangling.target.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// Registered states in first-registration order.
    pub fn states(&self) -> &[S] {
        &self.registration_order
    }

    /// Targets reachable from `state`, in evaluation priority order.
    pub fn transitions_from(&self, state: &S) -> Vec<&S> {
        self.states
            .get(state)
            .map(|entry| entry.transitions.iter().map(|c| &c.target).collect())
            .unwrap_or_default()
    }

    /// Retained transition history. Bounded by
    /// [`DEFAULT_HISTORY_LIMIT`] unless changed with
    /// [`set_history_limit`](Self::set_history_limit).
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Change how many transitions are retained. `None` keeps everything.
    pub fn set_history_limit(&mut self, limit: Option<usize>) {
        self.history.set_limit(limit);
    }

    /// Times the `from -> to` edge has been taken, including evicted history.
    pub fn transition_count(&self, from: &S, to: &S) -> usize {
        self.edge_counts
            .get(&(from.clone(), to.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn edge_counts(&self) -> impl Iterator<Item = (&S, &S, usize)> {
        self.edge_counts
            .iter()
            .map(|((from, to), count)| (from, to, *count))
    }

    /// Number of `update` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn restore_parts(
        &mut self,
        current: Option<S>,
        mut history: StateHistory<S>,
        edge_counts: HashMap<(S, S), usize>,
        ticks: u64,
    ) {
        history.set_limit(self.history.limit());
        self.current = current;
        self.history = history;
        self.edge_counts = edge_counts;
        self.ticks = ticks;
        self.updated_at = Utc::now();
    }

    fn change_state(&mut self, next: S, trigger: TransitionTrigger) -> Result<()> {
        if !self.states.contains_key(&next) {
            return Err(MachineError::UnknownState {
                state: next.name().to_string(),
            });
        }
        self.updated_at = Utc::now();

        if let Some(previous) = self.current.as_ref() {
            if let Some(entry) = self.states.get_mut(previous) {
                entry
                    .hooks
                    .run_exit()
                    .map_err(|source| MachineError::Hook {
                        state: previous.name().to_string(),
                        phase: HookPhase::Exit,
                        source,
                    })?;
            }
            for observer in &self.observers {
                observer.on_exit(previous);
            }
        }

        let previous = self.current.replace(next.clone());
        let transition = previous.map(|from| StateTransition {
            from,
            to: next.clone(),
            trigger,
            tick: self.ticks,
            timestamp: Utc::now(),
        });
        if let Some(transition) = &transition {
            *self
                .edge_counts
                .entry((transition.from.clone(), transition.to.clone()))
                .or_insert(0) += 1;
            self.history.push(transition.clone());
        }

        if let Some(entry) = self.states.get_mut(&next) {
            entry
                .hooks
                .run_enter()
                .map_err(|source| MachineError::Hook {
                    state: next.name().to_string(),
                    phase: HookPhase::Enter,
                    source,
                })?;
        }
        for observer in &self.observers {
            observer.on_enter(&next);
        }
        if let Some(transition) = &transition {
            for observer in &self.observers {
                observer.on_transition(transition);
            }
        }
        Ok(())
    }
}

impl<S: State, O> Default for StateMachine<S, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, O> fmt::Debug for StateMachine<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.registration_order)
            .field("current", &self.current)
            .field("ticks", &self.ticks)
            .field("history_len", &self.history.len())
            .finish()
    }
}
