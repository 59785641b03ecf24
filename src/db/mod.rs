//! SQLite data access.
//!
//! This module provides:
//! - A connection factory implementing scoped acquisition (one fresh
//!   connection per operation, released on every exit path)
//! - The schema store owning table definitions and seed data
//! - The SQL executor running single statements against the store

pub mod executor;
pub mod schema;

pub use executor::*;
pub use schema::*;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Opens one fresh SQLite connection per operation.
///
/// No connection is ever held across requests; the connection closes when
/// the operation's scope ends, on success and on failure alike.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    path: PathBuf,
}

impl ConnectionFactory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection for the duration of one operation.
    pub fn open(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.path)
    }
}
