//! Configuration for the banter engine, loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid config and
//! partial documents override only what they name.

pub mod defaults;
pub mod match_config;
pub mod storage_config;

pub use match_config::{MatchConfig, ResponseSelection};
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{BanterError, BanterResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BanterConfig {
    pub storage: StorageConfig,
    pub matching: MatchConfig,
}

impl BanterConfig {
    /// Parse a TOML document. Unknown keys are ignored, missing keys take
    /// their defaults.
    pub fn from_toml(text: &str) -> BanterResult<Self> {
        toml::from_str(text).map_err(|e| BanterError::Config {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &std::path::Path) -> BanterResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BanterError::Config {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }
}
