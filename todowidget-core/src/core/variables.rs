//! String-keyed variables: scalar preferences and per-entity attributes.
//!
//! Variables share one flat namespace. Composite attributes such as a note
//! title are ordinary variables whose key is a fixed prefix followed by an id
//! (`title_7`, `offset_12`).

use crate::core::transaction::Statement;
use crate::{Result, Storage, TodoError};
use rusqlite::OptionalExtension;

/// Returned by [`VariableStore::get_int`] when the variable is absent.
pub const UNSET: i64 = -1;

/// Key prefix for per-note titles.
pub const TITLE_KEY: &str = "title_";
/// Key prefix for per-widget scroll offsets.
pub const OFFSET_KEY: &str = "offset_";

/// Read/write access to the `variables` table of a [`Storage`].
#[derive(Clone, Copy)]
pub struct VariableStore<'a> {
    storage: &'a Storage,
}

impl<'a> VariableStore<'a> {
    pub(crate) fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Returns the stored value of `name`, or `None` if no row matches.
    pub fn get(&self, name: &str) -> Result<Option<String>> {
        self.storage.query(
            || format!("Error getting variable [{name}]"),
            None,
            |conn| {
                let value = conn
                    .query_row(
                        "SELECT value FROM variables WHERE name = ?",
                        [name],
                        |row| row.get::<_, Option<String>>(0),
                    )
                    .optional()?;
                Ok(value.flatten())
            },
        )
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.storage.execute(
            || format!("Error writing variable to database [{name},{value}]"),
            &[set_statement(name, value)],
        )
    }

    /// Stores every pair in one atomic batch.
    pub fn set_many(&self, pairs: &[(&str, String)]) -> Result<()> {
        let statements: Vec<Statement> = pairs
            .iter()
            .map(|(name, value)| set_statement(name, value))
            .collect();
        self.storage.execute(
            || format!("Error writing {} variables to database", pairs.len()),
            &statements,
        )
    }

    /// Removes `name`. Removing an absent variable is not an error.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.storage.execute(
            || format!("Error removing variable from database [{name}]"),
            &[Statement::with_params(
                "DELETE FROM variables WHERE name = ?",
                [name.to_string()],
            )],
        )
    }

    /// Reads `name` as a decimal integer; [`UNSET`] when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::MalformedVariable`] if the stored text is not an
    /// integer, regardless of the error policy.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            None => Ok(UNSET),
            Some(value) => value.parse().map_err(|_| {
                log::error!("Variable [{name}] is not an integer: {value:?}");
                TodoError::MalformedVariable {
                    name: name.to_string(),
                    value,
                }
            }),
        }
    }

    /// Stores `value` as decimal text.
    pub fn set_int(&self, name: &str, value: i64) -> Result<()> {
        self.set(name, &value.to_string())
    }

    /// Reads `name` as a flag: absent or `"false"` is false, anything else is true.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some_and(|value| value != "false"))
    }

    /// Stores `value` as the literal `"true"` or `"false"`.
    pub fn set_bool(&self, name: &str, value: bool) -> Result<()> {
        self.set(name, if value { "true" } else { "false" })
    }

    /// Title of note `id`, or an empty string.
    pub fn title(&self, id: i64) -> Result<String> {
        Ok(self.get(&title_key(id))?.unwrap_or_default())
    }

    /// Stores the title of note `id`.
    pub fn set_title(&self, id: i64, title: &str) -> Result<()> {
        self.set(&title_key(id), title)
    }

    /// Removes the title of note `id`.
    pub fn delete_title(&self, id: i64) -> Result<()> {
        self.delete(&title_key(id))
    }

    /// Scroll offset of widget `widget_id`; never negative.
    pub fn offset(&self, widget_id: i64) -> Result<i64> {
        Ok(self.get_int(&offset_key(widget_id))?.max(0))
    }

    /// Stores the scroll offset of `widget_id`, clamping negatives to 0.
    pub fn set_offset(&self, widget_id: i64, offset: i64) -> Result<()> {
        self.set_int(&offset_key(widget_id), offset.max(0))
    }
}

/// Variable name holding the title of note `id`.
pub fn title_key(id: i64) -> String {
    format!("{TITLE_KEY}{id}")
}

/// Variable name holding the scroll offset of widget `widget_id`.
pub fn offset_key(widget_id: i64) -> String {
    format!("{OFFSET_KEY}{widget_id}")
}

fn set_statement(name: &str, value: &str) -> Statement {
    Statement::with_params(
        "REPLACE INTO variables (name, value) VALUES (?, ?)",
        [name.to_string(), value.to_string()],
    )
}
