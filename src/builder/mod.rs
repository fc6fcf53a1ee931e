//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! declaring machines with minimal boilerplate.

pub mod machine;
pub mod macros;

pub use machine::StateMachineBuilder;

use crate::core::{Guard, State};
use crate::machine::{Result, StateMachine};

/// Build a machine whose states form a single directed cycle.
///
/// `stages` pairs each state with the guard that moves it to the next stage;
/// the last stage loops back to the first. Nothing is entered yet.
///
/// # Example
///
/// ```
/// use brigade::builder::cycle;
/// use brigade::core::Guard;
/// use brigade::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red => "RED",
///         Green => "GREEN",
///     }
/// }
///
/// let mut machine = cycle::<Light, bool>(vec![
///     (Light::Red, Guard::new(|go: &bool| *go)),
///     (Light::Green, Guard::new(|go: &bool| !*go)),
/// ])
/// .unwrap();
///
/// machine.set_state(Light::Red).unwrap();
/// machine.update(&true).unwrap();
/// assert_eq!(machine.get_state(), Some(&Light::Green));
/// machine.update(&false).unwrap();
/// assert_eq!(machine.get_state(), Some(&Light::Red));
/// ```
pub fn cycle<S, O>(stages: Vec<(S, Guard<O>)>) -> Result<StateMachine<S, O>>
where
    S: State + 'static,
{
    let order: Vec<S> = stages.iter().map(|(state, _)| state.clone()).collect();
    let mut builder = StateMachineBuilder::new().states(order.iter().cloned());

    for (index, (from, guard)) in stages.into_iter().enumerate() {
        let to = order[(index + 1) % order.len()].clone();
        builder = builder.guard(from, to, guard);
    }
    builder.build()
}
