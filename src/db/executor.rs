//! SQL executor: runs one statement per call against the store.

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::query::types::{ExecutionResult, SqlValue};

use super::ConnectionFactory;

/// Executes single SQL statements.
///
/// Never raises past its own boundary: every driver-level failure comes
/// back as a displayable `Message`. Each call opens and closes its own
/// connection.
#[derive(Debug, Clone)]
pub struct SqlExecutor {
    factory: ConnectionFactory,
}

impl SqlExecutor {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }

    /// Execute one SQL statement.
    ///
    /// A statement whose trimmed, case-insensitive prefix is `select`
    /// runs as a read query and yields a `Table` in the store's native
    /// row order. Anything else runs as a write/DDL statement and yields
    /// `RowsAffected` (0 for DDL).
    pub fn execute(&self, sql: &str) -> ExecutionResult {
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            return ExecutionResult::message("Error executing query: empty statement");
        }

        match self.try_execute(trimmed) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(error = %e, "Statement failed");
                ExecutionResult::Message(format!("Error executing query: {}", e))
            }
        }
    }

    fn try_execute(&self, sql: &str) -> rusqlite::Result<ExecutionResult> {
        let conn = self.factory.open()?;
        if sql.to_lowercase().starts_with("select") {
            Self::run_read(&conn, sql)
        } else {
            Self::run_write(&conn, sql)
        }
    }

    fn run_read(conn: &Connection, sql: &str) -> rusqlite::Result<ExecutionResult> {
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let column_count = columns.len();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(column_count);
            for i in 0..column_count {
                record.push(value_from_ref(row.get_ref(i)?));
            }
            out.push(record);
        }

        Ok(ExecutionResult::Table { columns, rows: out })
    }

    fn run_write(conn: &Connection, sql: &str) -> rusqlite::Result<ExecutionResult> {
        let affected = conn.execute(sql, [])?;
        Ok(ExecutionResult::RowsAffected(affected))
    }
}

fn value_from_ref(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Integer(i),
        ValueRef::Real(r) => SqlValue::Real(r),
        ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => SqlValue::Text(format!("<blob {} bytes>", b.len())),
    }
}
