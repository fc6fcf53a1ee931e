//! Tokens the chef guards compare observations against.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid chef config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config field '{0}' must not be empty")]
    EmptyToken(&'static str),
}

/// Vocabulary used by the chef machine's guards.
///
/// Missing fields fall back to the reference tokens, so `{}` is a valid
/// config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChefConfig {
    /// Held-item token meaning "hands are free"
    pub empty_hand: String,
    pub onion: String,
    pub soup: String,
    /// Location token of the onion dispenser
    pub onion_station: String,
}

impl Default for ChefConfig {
    fn default() -> Self {
        Self {
            empty_hand: "empty".to_string(),
            onion: "onion".to_string(),
            soup: "soup".to_string(),
            onion_station: "at_onion_station".to_string(),
        }
    }
}

impl ChefConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("empty_hand", &self.empty_hand),
            ("onion", &self.onion),
            ("soup", &self.soup),
            ("onion_station", &self.onion_station),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some(&(name, _)) => Err(ConfigError::EmptyToken(name)),
            None => Ok(()),
        }
    }
}
