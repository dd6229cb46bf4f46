//! Oracle configuration.
//!
//! Loaded from a RON file; every field has a default so a partial file
//! (or none at all) works. Command-line flags override the loaded values.

use std::path::{Path, PathBuf};

use bw_core::placement::DEFAULT_BUILD_SEARCH_RANGE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read file.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        /// File that failed.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse RON.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// Runtime settings for `bw-oracle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Scenario loaded at startup.
    pub scenario: Option<PathBuf>,
    /// Ring radius for `build_location` requests that give none.
    pub build_search_range: i32,
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Pretty-print responses instead of one object per line.
    pub pretty: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            build_search_range: DEFAULT_BUILD_SEARCH_RANGE,
            log_filter: "info".to_string(),
            pretty: false,
        }
    }
}

impl OracleConfig {
    /// Load a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Parse a config from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(ron)?)
    }
}
