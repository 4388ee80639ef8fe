//! Observer list configuration
//!
//! Configuration is a small JSON document. Every field is optional; missing
//! fields fall back to their defaults.
//!
//! ```json
//! { "policy": "all_observers", "checkEmpty": true }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which observers a pass reaches when observers are added mid-pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObserverListPolicy {
    /// Only observers registered when the pass started - this is the default
    #[default]
    ExistingOnly,
    /// Also observers appended while the pass is running
    AllObservers,
}

impl ObserverListPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExistingOnly => "existing_only",
            Self::AllObservers => "all_observers",
        }
    }
}

/// Configuration for an [`ObserverList`](crate::ObserverList)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserverListConfig {
    /// Mid-pass addition policy
    pub policy: ObserverListPolicy,

    /// Warn if the list is dropped while observers are still registered
    pub check_empty: bool,
}

impl ObserverListConfig {
    pub fn with_policy(mut self, policy: ObserverListPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_check_empty(mut self, check_empty: bool) -> Self {
        self.check_empty = check_empty;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration JSON
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
