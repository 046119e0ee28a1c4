//! Configuration for the cyclic tick demo.
//!
//! TOML with human-readable durations; defaults suit a quick interactive
//! run, explicit values suit scripted measurements.

use std::path::{Path, PathBuf};

use millitick_clock::MissedTickPolicy;
use millitick_core::Timestamp;
use serde::{Deserialize, Serialize};

/// Tick demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Tick period.
    #[serde(with = "millitick_core::serde_human")]
    pub period: Timestamp,

    /// Number of ticks to run (0 = run until interrupted).
    pub count: u64,

    /// Missed-tick handling.
    pub policy: MissedTickPolicy,

    /// Size of the jitter sample ring buffer.
    pub histogram_size: usize,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Timestamp::from_millis(100),
            count: 50,
            policy: MissedTickPolicy::Burst,
            histogram_size: 1_000,
        }
    }
}

impl TickConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}
