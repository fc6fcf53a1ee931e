//! Core State trait for state machine states.
//!
//! States are plain values from a closed, caller-defined vocabulary. The
//! engine keys its tables by state, so every state must be hashable.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records and step results
/// - `Eq` + `Hash`: States key the hook and transition tables
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: States travel inside checkpoints
///
/// # Example
///
/// ```rust
/// use brigade::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Burner {
///     Off,
///     Simmer,
///     Boil,
/// }
///
/// impl State for Burner {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "OFF",
///             Self::Simmer => "SIMMER",
///             Self::Boil => "BOIL",
///         }
///     }
/// }
///
/// assert_eq!(Burner::Simmer.name(), "SIMMER");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Identifier reported to callers and used in logs and errors.
    fn name(&self) -> &str;
}
