//! Persistence core for the ToDo list widget.
//!
//! The primary entry point is [`Storage`], an open handle to the widget's
//! SQLite file. Scalar preferences and per-list attributes go through
//! [`Storage::variables`]; list items go through [`Storage::notes`].
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    config::{ErrorPolicy, StoreConfig, DATABASE_NAME},
    error::{Result, TodoError},
    note::{Note, NoteStatus},
    notes::NoteStore,
    preferences::{
        Preferences, DEFAULT_RESOURCE_ID, PREF_BACKGROUND, PREF_COLOR_ACTIVE,
        PREF_COLOR_FINISHED, PREF_ICONS, PREF_SCROLLBUTTONS, PREF_SIZE,
    },
    resources::{ResourceHandle, ResourceRegistry, DEFAULT_TOP_PADDING},
    schema::{SchemaManager, DATABASE_VERSION},
    storage::Storage,
    transaction::{execute_batch, Statement},
    variables::{offset_key, title_key, VariableStore, OFFSET_KEY, TITLE_KEY, UNSET},
};
