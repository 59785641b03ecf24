//! LLM fallback translation.
//!
//! This module provides:
//! - The `SqlTranslator` trait, the narrow injected interface the query
//!   engine depends on
//! - An OpenAI-compatible chat-completion implementation
//! - A deterministic mock for tests

pub mod api;
pub mod mock;
pub mod traits;

pub use api::*;
pub use mock::*;
pub use traits::*;
