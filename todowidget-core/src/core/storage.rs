//! The open handle to a ToDo widget database file.

use crate::core::transaction::{execute_batch, Statement};
use crate::{
    ErrorPolicy, NoteStore, Preferences, ResourceRegistry, Result, SchemaManager, StoreConfig,
    TodoError, VariableStore, DATABASE_NAME,
};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// A long-lived connection to the backing file plus the configured error policy.
///
/// All reads and writes are serialised through one mutex-guarded connection.
/// Writes run through [`execute_batch`], so each call is atomic. Failures are
/// always logged; whether they also reach the caller depends on
/// [`StoreConfig::error_policy`].
pub struct Storage {
    conn: Mutex<Connection>,
    config: StoreConfig,
}

impl Storage {
    /// Opens (or creates) the store at `path` and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Database`] if the file cannot be opened at all, and
    /// [`TodoError::NewerSchema`] if it belongs to a newer version of this code.
    /// Under [`ErrorPolicy::Strict`] any schema initialisation or upgrade
    /// failure is returned as well; under [`ErrorPolicy::Swallow`] it is logged
    /// and the store is opened at whatever version it already had.
    pub fn open<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Self> {
        Self::open_with_schema(path, config, &SchemaManager::default())
    }

    /// Opens the store named [`DATABASE_NAME`] inside `dir`.
    pub fn open_in_dir<P: AsRef<Path>>(dir: P, config: StoreConfig) -> Result<Self> {
        Self::open(dir.as_ref().join(DATABASE_NAME), config)
    }

    /// Like [`open`](Self::open), with a caller-supplied target version and migrations.
    pub fn open_with_schema<P: AsRef<Path>>(
        path: P,
        config: StoreConfig,
        schema: &SchemaManager,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path).map_err(|e| {
            log::error!("Unable to open database {}: {e}", path.display());
            e
        })?;

        if let Err(e) = schema.ensure(&mut conn) {
            match (config.error_policy, &e) {
                (_, TodoError::NewerSchema { .. }) | (ErrorPolicy::Strict, _) => return Err(e),
                (ErrorPolicy::Swallow, _) => {
                    log::error!("Continuing with unmodified schema in {}", path.display());
                }
            }
        }

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// The resource registry supplied through [`StoreConfig::resources`].
    pub fn resources(&self) -> &ResourceRegistry {
        &self.config.resources
    }

    /// Loads the current [`Preferences`] snapshot.
    pub fn preferences(&self) -> Result<Preferences> {
        Preferences::load(&self.variables())
    }

    /// The string key/value store.
    pub fn variables(&self) -> VariableStore<'_> {
        VariableStore::new(self)
    }

    /// The note store.
    pub fn notes(&self) -> NoteStore<'_> {
        NoteStore::new(self)
    }

    /// Reads the schema version marker of the open file.
    pub fn schema_version(&self) -> Result<u32> {
        self.with_connection(|conn| SchemaManager::stored_version(conn))
    }

    /// Runs `statements` as one atomic batch, containing failures per the error policy.
    pub(crate) fn execute(
        &self,
        context: impl FnOnce() -> String,
        statements: &[Statement],
    ) -> Result<()> {
        let outcome = self.with_connection(|conn| execute_batch(conn, statements).map(|_| ()));
        self.contain(context, outcome, ())
    }

    /// Runs a read, returning `fallback` in place of a contained failure.
    pub(crate) fn query<T>(
        &self,
        context: impl FnOnce() -> String,
        fallback: T,
        read: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let outcome = self.with_connection(|conn| read(conn));
        self.contain(context, outcome, fallback)
    }

    pub(crate) fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn.lock().map_err(|_| TodoError::LockPoisoned)?;
        f(&mut *conn)
    }

    fn contain<T>(
        &self,
        context: impl FnOnce() -> String,
        outcome: Result<T>,
        fallback: T,
    ) -> Result<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(e) => {
                log::error!("{}: {e}", context());
                match self.config.error_policy {
                    ErrorPolicy::Swallow => Ok(fallback),
                    ErrorPolicy::Strict => Err(e),
                }
            }
        }
    }
}
