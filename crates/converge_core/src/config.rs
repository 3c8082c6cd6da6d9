//! Configuration types for wait timing.

use crate::error::{Result, WaitError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "converge.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Wait timing configuration.
    #[serde(default)]
    pub wait: WaitConfig,
}

impl Config {
    /// Load configuration from a file, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| WaitError::ConfigError(format!("failed to read config: {}", e)))?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| WaitError::ConfigError(format!("failed to parse config: {}", e)))?;
            config.wait.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content)
            .map_err(|e| WaitError::ConfigError(format!("failed to write config: {}", e)))?;
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| WaitError::ConfigError(format!("failed to serialize config: {}", e)))
    }
}

/// Timing shared by every wait call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WaitConfig {
    /// Timeout used when a wait call does not pass its own (default: 10).
    pub timeout_secs: u64,

    /// Length of one poll tick in milliseconds (default: 100).
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            poll_interval_ms: 100,
        }
    }
}

impl WaitConfig {
    /// Returns the default timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject zero timings.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(WaitError::InvalidTimeout(self.timeout()));
        }
        if self.poll_interval_ms == 0 {
            return Err(WaitError::InvalidPollInterval(self.poll_interval()));
        }
        Ok(())
    }
}
