//! Internal domain modules for the ToDo widget core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod config;
pub mod error;
pub mod note;
pub mod notes;
pub mod preferences;
pub mod resources;
pub mod schema;
pub mod storage;
pub mod transaction;
pub mod variables;

#[doc(inline)]
pub use config::{ErrorPolicy, StoreConfig, DATABASE_NAME};
#[doc(inline)]
pub use error::{Result, TodoError};
#[doc(inline)]
pub use note::{Note, NoteStatus};
#[doc(inline)]
pub use notes::NoteStore;
#[doc(inline)]
pub use preferences::Preferences;
#[doc(inline)]
pub use resources::{ResourceHandle, ResourceRegistry};
#[doc(inline)]
pub use schema::{SchemaManager, DATABASE_VERSION};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use transaction::{execute_batch, Statement};
#[doc(inline)]
pub use variables::VariableStore;
