//! Guard predicates for controlling state transitions.
//!
//! A guard is a pure boolean function over the observation record handed to
//! [`StateMachine::update`](crate::machine::StateMachine::update). Every guard
//! of a machine receives the same record type and reads only the fields it
//! needs.

use std::fmt;

/// Pure predicate that decides whether a transition is eligible.
///
/// # Example
///
/// ```rust
/// use brigade::core::Guard;
///
/// struct Tick {
///     pending: usize,
/// }
///
/// let has_work = Guard::new(|tick: &Tick| tick.pending > 0);
///
/// assert!(has_work.check(&Tick { pending: 2 }));
/// assert!(!has_work.check(&Tick { pending: 0 }));
/// ```
pub struct Guard<O> {
    predicate: Box<dyn Fn(&O) -> bool + Send + Sync>,
}

impl<O> Guard<O> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that is always satisfied.
    pub fn always() -> Self
    where
        O: 'static,
    {
        Guard::new(|_: &O| true)
    }

    /// Evaluate the guard against one observation.
    pub fn check(&self, observation: &O) -> bool {
        (self.predicate)(observation)
    }
}

impl<O> fmt::Debug for Guard<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
