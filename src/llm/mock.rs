//! Deterministic translator double for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::TranslateError;

use super::SqlTranslator;

enum MockBehavior {
    Reply(String),
    Fail(String),
    TimeOut,
}

/// A translator that returns a canned reply (or failure) and counts how
/// often it was invoked.
pub struct MockTranslator {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Always reply with the given SQL statement.
    pub fn replying(sql: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(sql.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with an API error carrying the given diagnostic.
    pub fn failing(diagnostic: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(diagnostic.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with a timeout.
    pub fn timing_out() -> Self {
        Self {
            behavior: MockBehavior::TimeOut,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `translate` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlTranslator for MockTranslator {
    async fn translate(
        &self,
        _user_text: &str,
        _schema_text: &str,
    ) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Reply(sql) => Ok(sql.clone()),
            MockBehavior::Fail(diag) => Err(TranslateError::Api(diag.clone())),
            MockBehavior::TimeOut => Err(TranslateError::Timeout),
        }
    }
}
