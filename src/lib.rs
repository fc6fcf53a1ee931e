//! Brigade: a guarded finite state machine engine for rule-based agents
//!
//! A machine holds one active state out of a registered set. Each state may
//! carry `on_enter` / `on_exit` hooks and an ordered list of guarded
//! transitions. The owner feeds it one observation per decision tick via
//! `update`; the first transition whose guard holds fires, and at most one
//! fires per tick.
//!
//! # Core Concepts
//!
//! - **State**: Closed, typed vocabulary via the `State` trait and `state_enum!`
//! - **Guards**: Pure predicates over a single observation record
//! - **Hooks**: Side effects run synchronously when a state is entered or left
//! - **Observers**: Injected listeners; the engine itself performs no I/O
//! - **History**: Bounded record of recent state changes
//!
//! # Example
//!
//! ```rust
//! use brigade::chef::{ChefAgent, ChefConfig, ChefState, Observation};
//!
//! let mut agent = ChefAgent::new(&ChefConfig::default()).unwrap();
//! let ticks = [
//!     Observation::new("empty", "counter", vec!["soup".to_string()]),
//!     Observation::new("empty", "at_onion_station", vec![]),
//!     Observation::new("onion", "at_onion_station", vec![]),
//!     Observation::new("soup", "pot", vec![]),
//!     Observation::new("empty", "serving_window", vec![]),
//! ];
//! for obs in &ticks {
//!     agent.act(obs).unwrap();
//! }
//! assert_eq!(agent.state(), Some(ChefState::Idle));
//! assert_eq!(agent.machine().history().guarded_count(), 5);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod chef;
pub mod core;
pub mod machine;
pub mod predicates;

// Re-export commonly used types
pub use builder::StateMachineBuilder;
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Guard, State, StateHistory, StateTransition, TransitionTrigger};
pub use machine::{
    MachineError, MachineObserver, StateHooks, StateMachine, Step, TracingObserver,
};
