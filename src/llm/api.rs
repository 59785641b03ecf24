//! API-based SQL translator (OpenAI-compatible chat completions).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::TranslateError;

use super::SqlTranslator;

/// OpenAI-compatible chat completion translator.
pub struct ApiSqlTranslator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Structured field the model is instructed to emit.
#[derive(Debug, Deserialize)]
struct TranslatorOutput {
    sql_query: String,
}

/// OpenAI error response format.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ApiSqlTranslator {
    /// Create a translator from configuration.
    ///
    /// Fails when no API key is configured and `OPENAI_API_KEY` is not
    /// set; callers treat that as "no translator available", not a
    /// startup error.
    pub fn from_config(config: &LlmConfig) -> Result<Self, TranslateError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                TranslateError::Api(
                    "API key not provided and OPENAI_API_KEY env var not set".to_string(),
                )
            })?;

        Self::new(&config.base_url, &config.model, &api_key, config.timeout_secs)
    }

    /// Create a translator with explicit parameters.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TranslateError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_system_prompt(schema_text: &str) -> String {
        format!(
            "You are an agent that can write SQL queries for a SQLite database. \
             Based on the user input and database schema below, write a SQL query \
             that would answer the user's question. Respond with a JSON object \
             containing a single field \"sql_query\" holding exactly one SQL \
             SELECT statement.\n\nDatabase schema:\n{}",
            schema_text
        )
    }

    async fn request_completion(
        &self,
        user_text: &str,
        schema_text: &str,
    ) -> Result<String, TranslateError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Self::build_system_prompt(schema_text),
                },
                ChatMessage {
                    role: "user",
                    content: user_text.to_string(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else if e.is_connect() {
                    TranslateError::Api(format!("Connection failed: {}", e))
                } else {
                    TranslateError::Api(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let result: ChatResponse = response.json().await.map_err(|e| {
                TranslateError::MalformedResponse(format!("Failed to parse response: {}", e))
            })?;
            let content = result
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| {
                    TranslateError::MalformedResponse("Response contained no choices".to_string())
                })?;
            extract_sql(&content)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Try to parse as OpenAI error format
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                Err(TranslateError::Api(format!(
                    "API error ({}): {}",
                    status, error_response.error.message
                )))
            } else {
                Err(TranslateError::Api(format!(
                    "API error ({}): {}",
                    status, error_text
                )))
            }
        }
    }
}

/// Parse the structured `sql_query` field out of the model's reply.
fn extract_sql(content: &str) -> Result<String, TranslateError> {
    match serde_json::from_str::<TranslatorOutput>(content) {
        Ok(output) => Ok(output.sql_query),
        Err(_) => {
            // Distinguish "valid JSON missing the field" from garbage
            if serde_json::from_str::<serde_json::Value>(content).is_ok() {
                Err(TranslateError::MissingField("sql_query".to_string()))
            } else {
                Err(TranslateError::MalformedResponse(
                    "Reply was not a JSON object".to_string(),
                ))
            }
        }
    }
}

#[async_trait]
impl SqlTranslator for ApiSqlTranslator {
    async fn translate(
        &self,
        user_text: &str,
        schema_text: &str,
    ) -> Result<String, TranslateError> {
        self.request_completion(user_text, schema_text).await
    }
}
