//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures the runtime position of a machine: current state,
//! transition history and tick count. Registrations (hooks and guards) are
//! code, not data, so they are not part of a checkpoint; restoring requires a
//! machine configured the same way.

use crate::core::{State, StateHistory};
use crate::machine::{MachineError, StateMachine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Metadata tracked by state machine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineMetadata {
    /// When machine was created
    pub created_at: DateTime<Utc>,

    /// Last time the machine was driven
    pub updated_at: DateTime<Utc>,

    /// Number of `update` calls
    pub ticks: u64,

    /// Times each edge was taken over the machine's lifetime, keyed
    /// `"FROM->TO"`
    pub transition_counts: BTreeMap<String, usize>,
}

/// Serializable checkpoint of state machine state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state of the machine, `None` if never set
    pub current_state: Option<S>,

    /// Retained transition history
    pub history: StateHistory<S>,

    /// Machine metadata
    pub metadata: MachineMetadata,
}

impl<S: State> Checkpoint<S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<S: State, O> StateMachine<S, O> {
    /// Capture the machine's current position.
    pub fn checkpoint(&self) -> Checkpoint<S> {
        let transition_counts = self
            .edge_counts()
            .map(|(from, to, count)| (edge_key(from, to), count))
            .collect();

        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.get_state().cloned(),
            history: self.history().clone(),
            metadata: MachineMetadata {
                created_at: self.created_at,
                updated_at: self.updated_at,
                ticks: self.ticks(),
                transition_counts,
            },
        }
    }

    /// Resume from a checkpoint.
    ///
    /// Every state the checkpoint names must be registered on this machine,
    /// and the history must be a connected chain ending in the current
    /// state. Nothing is changed when a check fails. No hooks or observers
    /// fire: the machine is put back where it was, not moved.
    pub fn restore(&mut self, checkpoint: Checkpoint<S>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;
        if let Some(state) = &checkpoint.current_state {
            self.require_registered(state)?;
        }
        self.check_history(&checkpoint)?;
        let edge_counts = self.parse_counts(&checkpoint)?;

        tracing::debug!(
            checkpoint = %checkpoint.id,
            state = checkpoint.current_state.as_ref().map(S::name),
            "restoring machine from checkpoint"
        );
        self.created_at = checkpoint.metadata.created_at;
        self.restore_parts(
            checkpoint.current_state,
            checkpoint.history,
            edge_counts,
            checkpoint.metadata.ticks,
        );
        Ok(())
    }

    fn require_registered(&self, state: &S) -> Result<(), CheckpointError> {
        if self.contains_state(state) {
            Ok(())
        } else {
            Err(MachineError::UnknownState {
                state: state.name().to_string(),
            }
            .into())
        }
    }

    fn check_history(&self, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError> {
        let mut previous: Option<&S> = None;
        for transition in checkpoint.history.transitions() {
            self.require_registered(&transition.from)?;
            self.require_registered(&transition.to)?;
            if let Some(previous) = previous {
                if *previous != transition.from {
                    return Err(CheckpointError::ValidationFailed(format!(
                        "history jumps from {} to {}",
                        previous.name(),
                        transition.from.name()
                    )));
                }
            }
            if transition.tick > checkpoint.metadata.ticks {
                return Err(CheckpointError::ValidationFailed(format!(
                    "transition at tick {} is ahead of tick count {}",
                    transition.tick, checkpoint.metadata.ticks
                )));
            }
            previous = Some(&transition.to);
        }

        match (checkpoint.history.last(), &checkpoint.current_state) {
            (Some(last), Some(current)) if last.to != *current => {
                Err(CheckpointError::ValidationFailed(format!(
                    "history ends in {} but current state is {}",
                    last.to.name(),
                    current.name()
                )))
            }
            (Some(last), None) => Err(CheckpointError::ValidationFailed(format!(
                "history ends in {} but no state is set",
                last.to.name()
            ))),
            _ => Ok(()),
        }
    }

    fn parse_counts(
        &self,
        checkpoint: &Checkpoint<S>,
    ) -> Result<HashMap<(S, S), usize>, CheckpointError> {
        let lookup = |name: &str| {
            self.states()
                .iter()
                .find(|state| state.name() == name)
                .cloned()
                .ok_or_else(|| CheckpointError::from(MachineError::UnknownState {
                    state: name.to_string(),
                }))
        };

        let mut counts = HashMap::new();
        for (key, count) in &checkpoint.metadata.transition_counts {
            let (from, to) = key.split_once("->").ok_or_else(|| {
                CheckpointError::ValidationFailed(format!("malformed edge key {key:?}"))
            })?;
            counts.insert((lookup(from)?, lookup(to)?), *count);
        }

        let mut retained: HashMap<(&S, &S), usize> = HashMap::new();
        for transition in checkpoint.history.transitions() {
            *retained.entry((&transition.from, &transition.to)).or_insert(0) += 1;
        }
        for ((from, to), seen) in retained {
            let counted = counts
                .get(&(from.clone(), to.clone()))
                .copied()
                .unwrap_or(0);
            if counted < seen {
                return Err(CheckpointError::ValidationFailed(format!(
                    "edge {} counted {counted} times but appears {seen} times in history",
                    edge_key(from, to)
                )));
            }
        }
        Ok(counts)
    }
}

fn edge_key<S: State>(from: &S, to: &S) -> String {
    format!("{}->{}", from.name(), to.name())
}
