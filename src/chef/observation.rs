use serde::{Deserialize, Serialize};

/// What a chef agent sees on one decision tick.
///
/// Every guard of the chef machine receives the whole record and reads only
/// the fields it needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Item in the agent's hands, `"empty"` when nothing is held
    pub holding: String,
    /// Named location the agent is standing at
    pub location: String,
    /// Pending orders
    #[serde(default)]
    pub orders: Vec<String>,
}

impl Observation {
    pub fn new(holding: impl Into<String>, location: impl Into<String>, orders: Vec<String>) -> Self {
        Self {
            holding: holding.into(),
            location: location.into(),
            orders,
        }
    }
}
