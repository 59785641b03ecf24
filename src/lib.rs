//! dbchat: chat with a SQLite database.
//!
//! Ask questions about an employees table in natural language or raw
//! SQL. Questions go through a deterministic rule-based intent resolver
//! mapped to fixed SQL templates; anything unmatched can fall back to an
//! LLM translator whose output is validated to exactly one SELECT
//! statement before execution.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod llm;
pub mod query;

pub use config::{Config, DatabaseConfig, LlmConfig, QueryConfig};
pub use db::{ConnectionFactory, SchemaStore, SqlExecutor, EMPLOYEES_DDL};
pub use error::{ConfigError, DbChatError, Result, SchemaError, TranslateError};
pub use format::render;
pub use llm::{ApiSqlTranslator, MockTranslator, SqlTranslator};
pub use query::{
    CandidateSql, ExecutionResult, IntentResolver, QueryEngine, QueryIntent, SqlGuardError,
    SqlValue, TranslationMode, UNRECOGNIZED_MESSAGE,
};
