//! Demo configuration
//!
//! Loaded from the JSON file named by `SHELLCAST_CONFIG` (or the first CLI
//! argument). Every field is optional.
//!
//! ```json
//! {
//!   "observers": { "policy": "all_observers", "checkEmpty": true },
//!   "busCapacity": 64,
//!   "logsDir": "/tmp/shellcast-logs"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shellcast_core::event_bus::DEFAULT_CAPACITY;
use shellcast_core::{ConfigError, ObserverListConfig};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SHELLCAST_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellcastConfig {
    pub observers: ObserverListConfig,
    pub bus_capacity: usize,
    /// Overrides the platform data directory for log files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs_dir: Option<PathBuf>,
}

impl Default for ShellcastConfig {
    fn default() -> Self {
        Self {
            observers: ObserverListConfig::default(),
            bus_capacity: DEFAULT_CAPACITY,
            logs_dir: None,
        }
    }
}

impl ShellcastConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Resolve the config from an explicit path, then `SHELLCAST_CONFIG`,
    /// then defaults.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        match explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from)) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Directory log files are written to
    pub fn logs_dir(&self) -> PathBuf {
        self.logs_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shellcast")
                .join("logs")
        })
    }
}
