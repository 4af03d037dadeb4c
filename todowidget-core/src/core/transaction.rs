//! Atomic execution of statement batches.

use crate::Result;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::borrow::Cow;

/// One SQL statement plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: Cow<'static, str>,
    params: Vec<Value>,
}

impl Statement {
    /// A statement without parameters, e.g. DDL from a migration script.
    pub fn new(sql: impl Into<Cow<'static, str>>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// A statement with positional parameters bound in order.
    pub fn with_params<I, V>(sql: impl Into<Cow<'static, str>>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runs every statement in `statements` inside a single transaction.
///
/// Commits only when all statements succeed. On the first failure the
/// transaction is dropped, which rolls it back, and the error is returned.
/// Empty SQL strings are skipped.
///
/// # Errors
///
/// Returns [`crate::TodoError::Database`] if any statement or the commit fails.
pub fn execute_batch(conn: &mut Connection, statements: &[Statement]) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut changed = 0;
    for statement in statements {
        if statement.sql.trim().is_empty() {
            continue;
        }
        changed += tx.execute(&statement.sql, params_from_iter(statement.params.iter()))?;
    }
    tx.commit()?;
    Ok(changed)
}
