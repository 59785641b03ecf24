//! Query Intent Resolver.
//!
//! A deterministic, ordered rule engine: schema-introspection rules are
//! tried first, then keyword-gated tabular rules. First match wins; all
//! tests run against the lowercased question text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::QueryIntent;

/// Table described when a question mentions a schema without naming a table.
const DEFAULT_TABLE: &str = "employees";

/// Words that gate the tabular rules. A question that carries none of
/// these never matches a tabular intent.
const TRIGGER_WORDS: &[&str] = &["show", "list", "get", "find", "what", "who"];

// ============================================================================
// Intent Resolver
// ============================================================================

/// Resolves free-text questions to query intents.
///
/// Side-effect free and deterministic: the same text always resolves to
/// the same intent. No LLM call happens here.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentResolver;

impl IntentResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve raw free text to a query intent.
    pub fn resolve(&self, text: &str) -> QueryIntent {
        let text = text.to_lowercase();

        // Rule 1: table listing
        if ["show tables", "list tables", "what tables"]
            .iter()
            .any(|p| text.contains(p))
        {
            return QueryIntent::ListTables;
        }

        // Rule 2: schema description, explicitly named table first
        if let Some(caps) = SCHEMA_FOR_PATTERN.captures(&text) {
            if let Some(table) = caps.get(1) {
                return QueryIntent::DescribeTable {
                    table: table.as_str().to_string(),
                };
            }
        }
        if text.contains("schema") {
            return QueryIntent::DescribeTable {
                table: DEFAULT_TABLE.to_string(),
            };
        }

        // Rule 3: tabular intents, gated on a trigger word
        if TRIGGER_WORDS.iter().any(|w| text.contains(w)) {
            if text.contains("all") && text.contains("employees") {
                return QueryIntent::SelectAll;
            }
            if text.contains("engineering") || text.contains("engineers") {
                return QueryIntent::FilterByDepartment {
                    department: "Engineering".to_string(),
                };
            }
            if text.contains("highest") && text.contains("salary") {
                return QueryIntent::TopBySalary;
            }
            if text.contains("average") && text.contains("salary") {
                return QueryIntent::AverageSalary;
            }
            if text.contains("department") && text.contains("count") {
                return QueryIntent::CountByDepartment;
            }
        }

        QueryIntent::Unrecognized
    }
}

// ============================================================================
// Patterns
// ============================================================================

static SCHEMA_FOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"schema\s+(?:for|of)\s+([a-z_][a-z0-9_]*)").expect("Invalid regex")
});

// ============================================================================
// Tests
// ============================================================================
