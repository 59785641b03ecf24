//! Error types for dbchat.

use thiserror::Error;

/// Main error type for dbchat operations.
#[derive(Error, Debug)]
pub enum DbChatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Schema initialization and introspection errors.
///
/// These are fatal at startup: the process should not serve queries
/// without a usable employees table.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to initialize schema: {0}")]
    Init(#[source] rusqlite::Error),

    #[error("Failed to seed sample data: {0}")]
    Seed(#[source] rusqlite::Error),

    #[error("Catalog query failed: {0}")]
    Catalog(#[source] rusqlite::Error),
}

/// LLM translation errors.
///
/// None of these propagate past the query engine: they all converge to
/// a displayable `Message` result.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Missing field in provider response: {0}")]
    MissingField(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for dbchat operations.
pub type Result<T> = std::result::Result<T, DbChatError>;
