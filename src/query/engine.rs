//! Query Engine.
//!
//! Drives one request end to end: resolve the question to an intent,
//! execute the matched template, or hand the question to the LLM
//! translator and execute its validated output. Every failure path
//! converges to a `Message` result; nothing recoverable escapes.

use std::sync::Arc;

use crate::db::{ConnectionFactory, SchemaStore, SqlExecutor};
use crate::llm::SqlTranslator;

use super::resolver::IntentResolver;
use super::types::{
    CandidateSql, ExecutionResult, QueryIntent, SqlValue, TranslationMode, UNRECOGNIZED_MESSAGE,
};

/// Executes natural language questions and direct SQL against the store.
pub struct QueryEngine {
    resolver: IntentResolver,
    schema: SchemaStore,
    executor: SqlExecutor,
    translator: Option<Arc<dyn SqlTranslator>>,
    mode: TranslationMode,
}

impl QueryEngine {
    /// Create an engine with no translator, in rules-first mode.
    pub fn new(factory: ConnectionFactory) -> Self {
        Self {
            resolver: IntentResolver::new(),
            schema: SchemaStore::new(factory.clone()),
            executor: SqlExecutor::new(factory),
            translator: None,
            mode: TranslationMode::RulesFirst,
        }
    }

    /// Attach an LLM translator.
    pub fn with_translator(mut self, translator: Arc<dyn SqlTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Select how the resolver and the translator are combined.
    pub fn with_mode(mut self, mode: TranslationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn schema_store(&self) -> &SchemaStore {
        &self.schema
    }

    /// Answer a natural language question.
    ///
    /// In agent mode every question goes straight to the translator
    /// (when one is attached). Otherwise the rule resolver runs first
    /// and the translator only sees questions no rule matched. Without
    /// a translator, unmatched questions get the fixed unmatched
    /// message.
    pub async fn ask(&self, text: &str) -> ExecutionResult {
        if self.mode == TranslationMode::Agent && self.translator.is_some() {
            return self.ask_translator(text).await;
        }

        let intent = self.resolver.resolve(text);
        tracing::debug!(intent = intent.display_name(), "Resolved intent");

        match intent {
            QueryIntent::Unrecognized => {
                if self.translator.is_some() {
                    self.ask_translator(text).await
                } else {
                    ExecutionResult::message(UNRECOGNIZED_MESSAGE)
                }
            }
            intent => self.execute_intent(&intent),
        }
    }

    /// Execute a caller-supplied SQL statement (direct-SQL mode).
    ///
    /// Unlike the translator path this accepts any single statement,
    /// including writes.
    pub fn run_sql(&self, sql: &str) -> ExecutionResult {
        self.executor.execute(sql)
    }

    /// Table catalog as an execution result.
    pub fn list_tables(&self) -> ExecutionResult {
        match self.schema.list_tables() {
            Ok(names) if names.is_empty() => ExecutionResult::message("No tables found."),
            Ok(names) => ExecutionResult::Table {
                columns: vec!["name".to_string()],
                rows: names
                    .into_iter()
                    .map(|n| vec![SqlValue::Text(n)])
                    .collect(),
            },
            Err(e) => ExecutionResult::Message(format!("Error executing query: {}", e)),
        }
    }

    /// Column catalog for one table as an execution result.
    pub fn describe_table(&self, table: &str) -> ExecutionResult {
        match self.schema.describe_table(table) {
            Ok(Some(columns)) => ExecutionResult::Table {
                columns: vec!["column".to_string(), "type".to_string()],
                rows: columns
                    .into_iter()
                    .map(|(name, ty)| vec![SqlValue::Text(name), SqlValue::Text(ty)])
                    .collect(),
            },
            Ok(None) => ExecutionResult::Message(format!("Table '{}' does not exist.", table)),
            Err(e) => ExecutionResult::Message(format!("Error executing query: {}", e)),
        }
    }

    fn execute_intent(&self, intent: &QueryIntent) -> ExecutionResult {
        match intent {
            QueryIntent::ListTables => self.list_tables(),
            QueryIntent::DescribeTable { table } => self.describe_table(table),
            other => match other.sql_template() {
                Some(sql) => self.executor.execute(&sql),
                // Unrecognized never reaches here; resolve() routed it already
                None => ExecutionResult::message(UNRECOGNIZED_MESSAGE),
            },
        }
    }

    async fn ask_translator(&self, text: &str) -> ExecutionResult {
        let Some(translator) = &self.translator else {
            return ExecutionResult::message(UNRECOGNIZED_MESSAGE);
        };

        let raw = match translator.translate(text, self.schema.schema_text()).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Translator call failed");
                return ExecutionResult::Message(format!("Error processing input: {}", e));
            }
        };

        let candidate = match CandidateSql::parse(&raw) {
            Ok(candidate) => candidate,
            Err(rejection) => {
                tracing::warn!(sql = %raw, "Rejected translator output");
                return ExecutionResult::Message(rejection.to_string());
            }
        };

        let result = self.executor.execute(candidate.as_str());
        if result.is_empty_table() {
            ExecutionResult::message("No results found.")
        } else {
            result
        }
    }
}
