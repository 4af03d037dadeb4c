//! Note value objects and the status code mapping.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a note, persisted as an integer code.
///
/// The store performs no transition validation: any status may overwrite
/// any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteStatus {
    #[default]
    Created,
    InProgress,
    Finished,
}

impl NoteStatus {
    /// All variants in code order.
    pub const ALL: [NoteStatus; 3] = [Self::Created, Self::InProgress, Self::Finished];

    /// The integer stored in the `status` column.
    pub fn code(self) -> i64 {
        match self {
            Self::Created => 0,
            Self::InProgress => 1,
            Self::Finished => 2,
        }
    }

    /// Decodes a stored status code. Unknown codes decode to [`NoteStatus::Created`].
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Created,
            1 => Self::InProgress,
            2 => Self::Finished,
            other => {
                log::warn!("Unknown note status code {other}, treating as CREATED");
                Self::Created
            }
        }
    }
}

/// A single list item.
///
/// `id` is `None` until the note has been read back from the store; the store
/// is the only source of assigned ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<i64>,
    pub list: i64,
    pub text: String,
    pub status: NoteStatus,
    /// Creation time in epoch milliseconds.
    pub created: i64,
}

impl Note {
    /// Creates an unsaved note in `list`, stamped with the current time.
    pub fn new(list: i64, text: impl Into<String>) -> Self {
        Self {
            id: None,
            list,
            text: text.into(),
            status: NoteStatus::Created,
            created: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// True when the store has not yet assigned an id.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
