//! Schema store: table definitions, seed data, and catalog introspection.

use rusqlite::params;

use crate::error::SchemaError;

use super::ConnectionFactory;

/// DDL for the employees table. Also embedded verbatim into the LLM
/// system prompt as the schema text.
pub const EMPLOYEES_DDL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    title TEXT NOT NULL,
    department TEXT NOT NULL,
    salary REAL NOT NULL
)";

/// Seed rows inserted exactly once, when the table is empty.
const SEED_ROWS: &[(i64, &str, &str, &str, f64)] = &[
    (1, "John Smith", "Software Engineer", "Engineering", 85000.0),
    (2, "Emily Johnson", "Product Manager", "Product", 95000.0),
    (3, "Michael Wong", "Data Scientist", "Analytics", 92000.0),
    (4, "Sarah Davis", "UX Designer", "Design", 80000.0),
    (5, "Robert Taylor", "Marketing Specialist", "Marketing", 75000.0),
];

/// Owns the schema and exposes read access to the table catalog.
///
/// The schema is immutable after initialization; `ensure_initialized` is
/// idempotent and may be called any number of times.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    factory: ConnectionFactory,
}

impl SchemaStore {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }

    /// Create the employees table if absent and seed it when empty.
    ///
    /// Seeding is gated on the row count, not table existence, so N calls
    /// leave exactly the same five rows as one call.
    pub fn ensure_initialized(&self) -> Result<(), SchemaError> {
        let conn = self.open()?;

        conn.execute(EMPLOYEES_DDL, [])
            .map_err(SchemaError::Init)?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .map_err(SchemaError::Init)?;

        if count == 0 {
            for (id, name, title, department, salary) in SEED_ROWS {
                conn.execute(
                    "INSERT INTO employees (id, name, title, department, salary) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![id, name, title, department, salary],
                )
                .map_err(SchemaError::Seed)?;
            }
            tracing::info!(rows = SEED_ROWS.len(), "Seeded employees table");
        }

        Ok(())
    }

    /// All user table names known to the store, sorted by name.
    ///
    /// Returns an empty list (not an error) when no tables exist.
    pub fn list_tables(&self) -> Result<Vec<String>, SchemaError> {
        let conn = self.open()?;
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(SchemaError::Catalog)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(SchemaError::Catalog)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(SchemaError::Catalog)?;
        Ok(names)
    }

    /// Column (name, declared type) pairs for a table, in column order.
    ///
    /// Returns `None` when the table does not exist. The name match is
    /// case-sensitive and exact.
    pub fn describe_table(&self, table: &str) -> Result<Option<Vec<(String, String)>>, SchemaError> {
        let conn = self.open()?;

        // sqlite_master comparison is BINARY, so this is the exact-name
        // check; pragma_table_info alone would match case-insensitively.
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get::<_, i64>(0).map(|n| n > 0),
            )
            .map_err(SchemaError::Catalog)?;
        if !exists {
            return Ok(None);
        }

        let mut stmt = conn
            .prepare("SELECT name, type FROM pragma_table_info(?1)")
            .map_err(SchemaError::Catalog)?;
        let columns = stmt
            .query_map(params![table], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(SchemaError::Catalog)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(SchemaError::Catalog)?;
        Ok(Some(columns))
    }

    /// Schema text handed to the LLM translator.
    pub fn schema_text(&self) -> &'static str {
        EMPLOYEES_DDL
    }

    /// Insert one employee record, letting the store assign the id.
    pub fn insert_employee(
        &self,
        name: &str,
        title: &str,
        department: &str,
        salary: f64,
    ) -> crate::error::Result<()> {
        let conn = self.open().map_err(crate::error::DbChatError::Schema)?;
        conn.execute(
            "INSERT INTO employees (name, title, department, salary) VALUES (?1, ?2, ?3, ?4)",
            params![name, title, department, salary],
        )?;
        Ok(())
    }

    fn open(&self) -> Result<rusqlite::Connection, SchemaError> {
        self.factory.open().map_err(|source| SchemaError::Open {
            path: self.factory.path().display().to_string(),
            source,
        })
    }
}
