//! Store configuration, persisted as a JSON file.

use crate::{ResourceRegistry, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the backing store inside the application data directory.
pub const DATABASE_NAME: &str = "ToDoWidget";

/// How failures after open are reported to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure and return the absent/default result.
    ///
    /// A failed write looks exactly like a successful one to the caller.
    #[default]
    Swallow,
    /// Log the failure and return it as an error.
    Strict,
}

/// Runtime configuration for a [`Storage`](crate::Storage).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub error_policy: ErrorPolicy,
    pub resources: ResourceRegistry,
}

impl StoreConfig {
    /// Configuration that surfaces every failure to the caller.
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::Strict,
            ..Self::default()
        }
    }

    /// Loads configuration from `path`; returns defaults if the file is missing or corrupt.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TodoError::Io`] or [`crate::TodoError::Json`] on failure.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
