//! Explorer configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use edgelab_core::data::DEFAULT_API_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Explorer settings. Every field has a default, so an empty file (or no
/// file at all) yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Coin symbol to explore.
    pub symbol: String,

    /// Candle API endpoint.
    pub api_url: String,

    /// Directory holding tested-set, history, and analysis state files.
    pub data_dir: PathBuf,

    /// Pause between period fetches, to stay polite to the API.
    pub fetch_delay_ms: u64,

    /// Pause between exploration iterations.
    pub iter_delay_ms: u64,

    /// RNG seed for reproducible runs. Unset means entropy-seeded.
    pub seed: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from("data"),
            fetch_delay_ms: 300,
            iter_delay_ms: 500,
            seed: None,
        }
    }
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
