//! Error types for the ToDo widget core library.

use thiserror::Error;

/// All errors that can occur within the ToDo widget core library.
///
/// Under the default [`ErrorPolicy::Swallow`](crate::ErrorPolicy::Swallow) most of
/// these never reach the caller: they are logged and replaced by an absent or
/// default result. [`ErrorPolicy::Strict`](crate::ErrorPolicy::Strict) returns them.
#[derive(Debug, Error)]
pub enum TodoError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No migration is registered for the exact version pair.
    #[error("No migration registered for schema version {from} -> {to}")]
    MigrationNotFound { from: u32, to: u32 },

    /// The file was written by a newer version of the schema than this code understands.
    #[error("Schema version {found} is newer than the supported version {expected}")]
    NewerSchema { found: u32, expected: u32 },

    /// A stored variable could not be parsed as the requested type.
    #[error("Variable '{name}' holds malformed value '{value}'")]
    MalformedVariable { name: String, value: String },

    /// The connection mutex was poisoned by a panicking holder.
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`TodoError`].
pub type Result<T> = std::result::Result<T, TodoError>;

impl TodoError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::MigrationNotFound { from, to } => {
                format!("Cannot upgrade saved lists from version {from} to {to}")
            }
            Self::NewerSchema { .. } => {
                "Saved lists were created by a newer version of the widget".to_string()
            }
            Self::MalformedVariable { name, .. } => format!("Setting '{name}' is corrupt"),
            Self::LockPoisoned => "Storage is unavailable".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Settings format error: {e}"),
        }
    }
}
