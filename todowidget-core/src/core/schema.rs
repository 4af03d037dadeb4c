//! Versioned table definitions and migrations between schema versions.
//!
//! The schema version is tracked in SQLite's own `PRAGMA user_version` marker.
//! A marker of `0` means the file has never been initialised.

use crate::core::transaction::{execute_batch, Statement};
use crate::{Result, TodoError};
use rusqlite::Connection;
use std::collections::HashMap;

/// The schema version this crate writes and expects.
pub const DATABASE_VERSION: u32 = 2;

/// Table definitions for a fresh store at [`DATABASE_VERSION`].
const CREATE_SQL: &str = include_str!("schema.sql");

/// `1 -> 2`: version 1 only had the `notes` table.
const UPGRADE_1_2: &str = "CREATE TABLE variables (name TEXT PRIMARY KEY, value TEXT);";

/// Owns the table definitions and the registered migration scripts.
///
/// Migrations are looked up by their exact `(from, to)` pair. There is no
/// chaining: upgrading `1 -> 3` needs a `1 -> 3` script even when `1 -> 2`
/// and `2 -> 3` are both registered.
#[derive(Debug, Clone)]
pub struct SchemaManager {
    version: u32,
    migrations: HashMap<(u32, u32), Vec<String>>,
}

impl Default for SchemaManager {
    fn default() -> Self {
        Self::new(DATABASE_VERSION).register(1, 2, UPGRADE_1_2)
    }
}

impl SchemaManager {
    /// A manager targeting `version` with no migrations registered.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            migrations: HashMap::new(),
        }
    }

    /// Registers `script` as the migration from `from` to `to`.
    ///
    /// The script may hold several `;`-separated statements; they are applied
    /// as one atomic batch. Registering the same pair twice replaces the script.
    #[must_use]
    pub fn register(mut self, from: u32, to: u32, script: &str) -> Self {
        self.migrations.insert((from, to), split_script(script));
        self
    }

    /// The version this manager brings a store up to.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Whether a script exists for exactly `from -> to`.
    pub fn has_migration(&self, from: u32, to: u32) -> bool {
        self.migrations.contains_key(&(from, to))
    }

    /// Reads the version marker of an open store.
    pub fn stored_version(conn: &Connection) -> Result<u32> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(u32::try_from(version).unwrap_or(0))
    }

    /// Brings the store behind `conn` up to [`version`](Self::version).
    ///
    /// Fresh files are initialised, older files are upgraded through a single
    /// registered migration.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::MigrationNotFound`] if the exact pair is not
    /// registered, [`TodoError::NewerSchema`] if the file is ahead of this code,
    /// or [`TodoError::Database`] for any SQLite failure. The store is left
    /// unchanged in every error case.
    pub fn ensure(&self, conn: &mut Connection) -> Result<()> {
        let found = Self::stored_version(conn)?;
        if found == 0 {
            self.initialize(conn)
        } else if found < self.version {
            self.upgrade(conn, found, self.version)
        } else if found > self.version {
            log::error!(
                "Schema version {found} is newer than supported version {}",
                self.version
            );
            Err(TodoError::NewerSchema {
                found,
                expected: self.version,
            })
        } else {
            Ok(())
        }
    }

    /// Creates every table for the current version and stamps the version marker.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Database`] if any statement fails; nothing is created
    /// in that case.
    pub fn initialize(&self, conn: &mut Connection) -> Result<()> {
        log::info!("Creating schema at version {}", self.version);
        let statements = with_version_bump(
            split_script(CREATE_SQL).into_iter().map(Statement::new),
            self.version,
        );
        execute_batch(conn, &statements).map_err(|e| {
            log::error!("Unable to create database: {e}");
            e
        })?;
        Ok(())
    }

    /// Applies the migration registered for exactly `old -> new`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::MigrationNotFound`] when no script is registered for
    /// the pair, or [`TodoError::Database`] if the script fails. In both cases
    /// the tables and the version marker are left as they were.
    pub fn upgrade(&self, conn: &mut Connection, old: u32, new: u32) -> Result<()> {
        log::info!("Upgrading schema {old}-{new}");
        let Some(script) = self.migrations.get(&(old, new)) else {
            log::error!("Unable to upgrade the database ({old}-{new}): no migration registered");
            return Err(TodoError::MigrationNotFound { from: old, to: new });
        };
        let statements = with_version_bump(script.iter().cloned().map(Statement::new), new);
        execute_batch(conn, &statements).map_err(|e| {
            log::error!("Unable to upgrade the database ({old}-{new}): {e}");
            e
        })?;
        Ok(())
    }
}

/// Splits a script on `;` into trimmed, non-empty statements.
fn split_script(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn with_version_bump(statements: impl Iterator<Item = Statement>, version: u32) -> Vec<Statement> {
    statements
        .chain(std::iter::once(Statement::new(format!(
            "PRAGMA user_version = {version}"
        ))))
        .collect()
}
