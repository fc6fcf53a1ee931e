//! Errors raised while registering or driving a state machine.

use std::fmt;
use thiserror::Error;

/// Error type returned by state hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Which lifecycle hook failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookPhase {
    Enter,
    Exit,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("on_enter"),
            Self::Exit => f.write_str("on_exit"),
        }
    }
}

/// Errors that can occur while configuring or evaluating a machine.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("State '{state}' does not exist")]
    UnknownState { state: String },

    #[error("Transition from '{from}' targets unregistered state '{to}'")]
    UnknownTarget { from: String, to: String },

    #[error("Machine has no current state. Call set_state first")]
    NotStarted,

    #[error("{phase} hook of state '{state}' failed: {source}")]
    Hook {
        state: String,
        phase: HookPhase,
        #[source]
        source: HookError,
    },
}

pub type Result<T> = std::result::Result<T, MachineError>;
