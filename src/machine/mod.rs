//! The state machine engine.
//!
//! This is the side-effecting shell around [`crate::core`]: it owns the
//! registered states, their hooks and guarded transitions, and evaluates one
//! step per `update` call.
//!
//! # Key Concepts
//!
//! - **States** are registered once, optionally with `on_enter` / `on_exit` hooks
//! - **Transitions** are guarded edges, tried in registration order
//! - **Observers** receive lifecycle events; the engine itself does no I/O

mod engine;
mod error;
mod hooks;
mod observer;

pub use engine::{StateMachine, Step, DEFAULT_HISTORY_LIMIT};
pub use error::{HookError, HookPhase, MachineError, Result};
pub use hooks::{Hook, HookResult, StateHooks};
pub use observer::{MachineObserver, TracingObserver};
