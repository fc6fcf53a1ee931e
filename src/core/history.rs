//! State transition history tracking.
//!
//! Every state change a machine performs while a state is already active is
//! recorded here. `record` is the immutable API and returns a new history;
//! the engine appends in place through `push`. A history may carry a
//! retention limit, in which case the oldest transitions are evicted first.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    /// Explicit `set_state` call by the owner of the machine.
    Forced,
    /// A guard matched during `update`.
    Guard,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use brigade::core::{StateTransition, TransitionTrigger};
/// use brigade::chef::ChefState;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: ChefState::Idle,
///     to: ChefState::PrepareSoup,
///     trigger: TransitionTrigger::Guard,
///     tick: 1,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.tick, 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Whether the change was forced or guard-driven
    pub trigger: TransitionTrigger,
    /// Number of `update` calls the machine had seen when this happened
    pub tick: u64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use brigade::core::{StateHistory, StateTransition, TransitionTrigger};
/// use brigade::chef::ChefState;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: ChefState::Idle,
///         to: ChefState::PrepareSoup,
///         trigger: TransitionTrigger::Guard,
///         tick: 1,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: ChefState::PrepareSoup,
///         to: ChefState::PickingOnion,
///         trigger: TransitionTrigger::Guard,
///         tick: 2,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], &ChefState::PickingOnion);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    /// Maximum number of retained transitions, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the retention limit, evicting the oldest transitions if the
    /// history is already longer than `limit`.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.evict();
    }

    /// Record a transition, returning a new history.
    ///
    /// The original history is left unchanged. This copies every retained
    /// transition; use [`push`](Self::push) on an owned history in hot paths.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// Append a transition in place. Amortized O(1).
    pub fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push_back(transition);
        self.evict();
    }

    fn evict(&mut self) {
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first retained `from` state followed by the `to` state of
    /// each transition. Empty when nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of transitions fired by guards, ignoring forced changes.
    pub fn guarded_count(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.trigger == TransitionTrigger::Guard)
            .count()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition<S>> {
        &self.transitions
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Chopping,
        Plating,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "IDLE",
                Self::Chopping => "CHOPPING",
                Self::Plating => "PLATING",
            }
        }
    }

    fn transition(
        from: TestState,
        to: TestState,
        trigger: TransitionTrigger,
    ) -> StateTransition<TestState> {
        StateTransition {
            from,
            to,
            trigger,
            tick: 0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(transition(
            TestState::Idle,
            TestState::Chopping,
            TransitionTrigger::Guard,
        ));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(
                TestState::Idle,
                TestState::Chopping,
                TransitionTrigger::Guard,
            ))
            .record(transition(
                TestState::Chopping,
                TestState::Plating,
                TransitionTrigger::Guard,
            ));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![&TestState::Idle, &TestState::Chopping, &TestState::Plating]
        );
    }

    #[test]
    fn guarded_count_skips_forced_changes() {
        let history = StateHistory::new()
            .record(transition(
                TestState::Idle,
                TestState::Chopping,
                TransitionTrigger::Forced,
            ))
            .record(transition(
                TestState::Chopping,
                TestState::Plating,
                TransitionTrigger::Guard,
            ));

        assert_eq!(history.len(), 2);
        assert_eq!(history.guarded_count(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateTransition {
                from: TestState::Idle,
                to: TestState::Chopping,
                trigger: TransitionTrigger::Guard,
                tick: 1,
                timestamp: start,
            })
            .record(StateTransition {
                from: TestState::Chopping,
                to: TestState::Plating,
                trigger: TransitionTrigger::Guard,
                tick: 2,
                timestamp: start + chrono::Duration::milliseconds(25),
            });

        assert_eq!(
            history.duration(),
            Some(std::time::Duration::from_millis(25))
        );
    }

    #[test]
    fn push_appends_in_place() {
        let mut history = StateHistory::new();
        history.push(transition(
            TestState::Idle,
            TestState::Chopping,
            TransitionTrigger::Guard,
        ));
        history.push(transition(
            TestState::Chopping,
            TestState::Plating,
            TransitionTrigger::Guard,
        ));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|t| t.to.clone()), Some(TestState::Plating));
    }

    #[test]
    fn limit_evicts_oldest_transitions() {
        let mut history = StateHistory::with_limit(2);
        history.push(transition(
            TestState::Idle,
            TestState::Chopping,
            TransitionTrigger::Forced,
        ));
        history.push(transition(
            TestState::Chopping,
            TestState::Plating,
            TransitionTrigger::Guard,
        ));
        history.push(transition(
            TestState::Plating,
            TestState::Idle,
            TransitionTrigger::Guard,
        ));

        assert_eq!(history.len(), 2);
        assert_eq!(history.guarded_count(), 2);
        assert_eq!(
            history.get_path(),
            vec![&TestState::Chopping, &TestState::Plating, &TestState::Idle]
        );
    }

    #[test]
    fn lowering_limit_trims_existing_history() {
        let mut history = StateHistory::new();
        for _ in 0..5 {
            history.push(transition(
                TestState::Idle,
                TestState::Chopping,
                TransitionTrigger::Guard,
            ));
        }
        history.set_limit(Some(3));

        assert_eq!(history.len(), 3);
        assert_eq!(history.limit(), Some(3));
    }

    #[test]
    fn trigger_serializes_as_snake_case() {
        let json = serde_json::to_string(&TransitionTrigger::Forced).unwrap();
        assert_eq!(json, "\"forced\"");
    }
}
