//! Observer interface for machine lifecycle events.
//!
//! The engine never writes to the console. Anything that wants to log,
//! count or trace state changes registers a [`MachineObserver`].

use crate::core::{State, StateTransition};

/// Receives notifications as a machine changes state.
///
/// All methods default to no-ops. Observers are called synchronously from
/// inside `set_state` / `update` and only get shared references, so they
/// cannot drive the machine they are observing.
pub trait MachineObserver<S: State>: Send {
    /// Called after `state`'s exit hook ran successfully.
    fn on_exit(&self, _state: &S) {}

    /// Called after `state`'s entry hook ran successfully.
    fn on_enter(&self, _state: &S) {}

    /// Called once a change from a previous state has completed.
    fn on_transition(&self, _transition: &StateTransition<S>) {}

    /// Called when `update` evaluated every candidate and none matched.
    fn on_idle_tick(&self, _state: Option<&S>, _tick: u64) {}
}

/// Observer that forwards lifecycle events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<S: State> MachineObserver<S> for TracingObserver {
    fn on_enter(&self, state: &S) {
        tracing::trace!(state = state.name(), "entered state");
    }

    fn on_exit(&self, state: &S) {
        tracing::trace!(state = state.name(), "exited state");
    }

    fn on_transition(&self, transition: &StateTransition<S>) {
        tracing::info!(
            from = transition.from.name(),
            to = transition.to.name(),
            trigger = ?transition.trigger,
            tick = transition.tick,
            "FSM transition"
        );
    }

    fn on_idle_tick(&self, state: Option<&S>, tick: u64) {
        tracing::debug!(state = state.map(S::name), tick, "no transition matched");
    }
}
