//! Natural language query resolution.
//!
//! This module provides:
//! - Intent resolution over a fixed rule set
//! - Shared query types (intents, results, the candidate-SQL guard)
//! - The query engine driving the whole request flow

pub mod engine;
pub mod resolver;
pub mod types;

pub use engine::*;
pub use resolver::*;
pub use types::*;
