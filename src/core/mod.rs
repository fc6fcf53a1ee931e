//! Core state machine types.
//!
//! This module contains the pure building blocks of the engine:
//! - State definitions via the `State` trait
//! - Guard predicates over observation records
//! - Transition history tracking
//!
//! Nothing here performs side effects; hooks and evaluation live in
//! [`crate::machine`].

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, TransitionTrigger};
pub use state::State;
