//! Translator trait definition.

use async_trait::async_trait;

use crate::error::TranslateError;

/// Trait for NL-to-SQL translation providers.
///
/// The only component with an external network dependency; injected so
/// tests can substitute a deterministic double. A provider makes exactly
/// one attempt per request and its output is validated by the query
/// engine before it can reach the executor.
#[async_trait]
pub trait SqlTranslator: Send + Sync {
    /// Translate a user question into a single SQL statement.
    ///
    /// `schema_text` is the DDL the provider should write queries
    /// against. The returned string is the raw candidate statement,
    /// not yet validated.
    async fn translate(
        &self,
        user_text: &str,
        schema_text: &str,
    ) -> Result<String, TranslateError>;
}
