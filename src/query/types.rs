//! Types for the natural language query system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when no intent matches and no translator is available.
pub const UNRECOGNIZED_MESSAGE: &str =
    "I couldn't convert that to an SQL query. Please try a different question or use direct SQL.";

// ============================================================================
// Query Intent
// ============================================================================

/// Classified intent for a natural language question.
///
/// Produced by the resolver, consumed exactly once to build a SQL
/// statement (or a catalog lookup for the introspection variants).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// List all tables in the store
    ListTables,
    /// Describe the columns of a named table
    DescribeTable { table: String },
    /// All employee rows
    SelectAll,
    /// Employees filtered to one department
    FilterByDepartment { department: String },
    /// The single highest-paid employee
    TopBySalary,
    /// Average salary across all employees
    AverageSalary,
    /// Employee count per department
    CountByDepartment,
    /// No rule matched
    #[default]
    Unrecognized,
}

impl QueryIntent {
    /// Get a human-readable name for this intent.
    pub fn display_name(&self) -> &str {
        match self {
            Self::ListTables => "List Tables",
            Self::DescribeTable { .. } => "Describe Table",
            Self::SelectAll => "All Employees",
            Self::FilterByDepartment { .. } => "Filter by Department",
            Self::TopBySalary => "Highest Salary",
            Self::AverageSalary => "Average Salary",
            Self::CountByDepartment => "Count by Department",
            Self::Unrecognized => "Unrecognized",
        }
    }

    /// The fixed SQL template for tabular intents.
    ///
    /// Introspection intents (`ListTables`, `DescribeTable`) go through
    /// the schema store's catalog instead and return `None` here, as does
    /// `Unrecognized`.
    pub fn sql_template(&self) -> Option<String> {
        match self {
            Self::SelectAll => Some("SELECT * FROM employees".to_string()),
            Self::FilterByDepartment { department } => Some(format!(
                "SELECT * FROM employees WHERE department = '{}'",
                department
            )),
            Self::TopBySalary => {
                Some("SELECT * FROM employees ORDER BY salary DESC LIMIT 1".to_string())
            }
            Self::AverageSalary => {
                Some("SELECT AVG(salary) as average_salary FROM employees".to_string())
            }
            Self::CountByDepartment => Some(
                "SELECT department, COUNT(*) as employee_count FROM employees GROUP BY department"
                    .to_string(),
            ),
            Self::ListTables | Self::DescribeTable { .. } | Self::Unrecognized => None,
        }
    }
}

// ============================================================================
// Scalar Values
// ============================================================================

/// A single scalar value in a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::Text(s) => write!(f, "{}", s),
            Self::Null => write!(f, "NULL"),
        }
    }
}

// ============================================================================
// Execution Result
// ============================================================================

/// Normalized outcome of executing one request.
///
/// Every request terminates in exactly one of these; there is no error
/// variant because failures are carried as `Message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionResult {
    /// A read query's result set, in the store's native row order.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<SqlValue>>,
    },
    /// Rows touched by a write or DDL statement (0 for DDL).
    RowsAffected(usize),
    /// A displayable diagnostic or informational string.
    Message(String),
}

impl ExecutionResult {
    /// Shortcut for building a message result.
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Whether this is a table with zero rows.
    pub fn is_empty_table(&self) -> bool {
        matches!(self, Self::Table { rows, .. } if rows.is_empty())
    }
}

// ============================================================================
// Candidate SQL
// ============================================================================

/// Why a translator-produced statement was rejected before execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlGuardError {
    #[error("Only SELECT queries are allowed.")]
    NotSelect,

    #[error("Only single SELECT statements are allowed.")]
    MultipleStatements,
}

/// A validated single-statement SELECT, as produced by the LLM fallback.
///
/// The guard is a security invariant: translator output never reaches the
/// executor unless it starts with `select` (case-insensitive) and contains
/// no semicolon before its final character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSql(String);

impl CandidateSql {
    /// Validate a raw translator statement.
    pub fn parse(raw: &str) -> std::result::Result<Self, SqlGuardError> {
        let trimmed = raw.trim();
        if !trimmed.to_lowercase().starts_with("select") {
            return Err(SqlGuardError::NotSelect);
        }
        let body = trimmed.strip_suffix(';').unwrap_or(trimmed);
        if body.contains(';') {
            return Err(SqlGuardError::MultipleStatements);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Translation Mode
// ============================================================================

/// How the engine combines the rule resolver and the LLM translator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationMode {
    /// Run the rule resolver first; call the translator only when no
    /// rule matches.
    #[default]
    #[serde(rename = "rules-first")]
    RulesFirst,
    /// Bypass the rule resolver and send every question to the
    /// translator.
    #[serde(rename = "agent")]
    Agent,
}

impl TranslationMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RulesFirst => "rules-first",
            Self::Agent => "agent",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
