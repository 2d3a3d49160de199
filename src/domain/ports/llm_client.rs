//! Chat completion port.
//!
//! The production research, writing and evaluation adapters all speak to a
//! chat model through this trait, so they can be exercised against
//! `MockLlmClient` without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::errors::WorkflowError;

/// Which agent is calling. Selects the model and default temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Scout,
    Writer,
    Validator,
}

impl AgentRole {
    /// Sampling temperature used when the request does not set one.
    pub const fn default_temperature(self) -> f32 {
        match self {
            Self::Scout => 0.3,
            Self::Writer => 0.8,
            Self::Validator => 0.2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Writer => "writer",
            Self::Validator => "validator",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constrains the shape of the model's answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Strict JSON matching `schema`.
    JsonSchema {
        name: String,
        schema: serde_json::Value,
    },
}

/// One chat completion call: a system prompt and a single user turn.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub role: AgentRole,
    pub system_prompt: String,
    pub user_message: String,
    /// Overrides the role's default temperature
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Overrides the configured model for the role
    pub model: Option<String>,
    pub response_format: Option<ResponseFormat>,
}

impl CompletionRequest {
    pub fn new(
        role: AgentRole,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            role,
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            temperature: None,
            max_tokens: None,
            model: None,
            response_format: None,
        }
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_json_schema(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.response_format = Some(ResponseFormat::JsonSchema {
            name: name.into(),
            schema,
        });
        self
    }

    /// Temperature actually sent to the model.
    pub fn effective_temperature(&self) -> f32 {
        self.temperature
            .unwrap_or_else(|| self.role.default_temperature())
    }
}

/// Transport-level failures from a chat completion backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    /// No API key or base URL available
    #[error("LLM client not configured: {0}")]
    NotConfigured(String),

    /// HTTP 400
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 401 / 403
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP 429
    #[error("Rate limit exceeded")]
    RateLimited,

    /// HTTP 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// Response body could not be read as a completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected status ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl LlmError {
    /// Returns true if this error is transient and should be retried
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Server { .. } | Self::Network(_) | Self::Timeout
        )
    }
}

impl From<LlmError> for WorkflowError {
    fn from(err: LlmError) -> Self {
        Self::Provider(err.to_string())
    }
}

/// Chat completion backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Backend identifier for logs (e.g., "openai", "mock").
    fn name(&self) -> &'static str;

    /// Run one completion and return the assistant's text.
    ///
    /// # Errors
    /// - `LlmError::RateLimited`, `Server`, `Network`, `Timeout` - transient,
    ///   already retried by implementations that retry
    /// - any other variant - permanent
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(LlmError::RateLimited.is_transient());
        assert!(LlmError::Timeout.is_transient());
        assert!(LlmError::Network("reset".to_string()).is_transient());
        assert!(LlmError::Server {
            status: 503,
            message: "overloaded".to_string()
        }
        .is_transient());

        assert!(!LlmError::Authentication("bad key".to_string()).is_transient());
        assert!(!LlmError::InvalidRequest("bad".to_string()).is_transient());
        assert!(!LlmError::InvalidResponse("empty".to_string()).is_transient());
    }

    #[test]
    fn test_llm_error_becomes_provider_error() {
        let err: WorkflowError = LlmError::RateLimited.into();
        assert_eq!(
            err,
            WorkflowError::Provider("Rate limit exceeded".to_string())
        );
    }

    #[test]
    fn test_role_temperatures() {
        let request = CompletionRequest::new(AgentRole::Writer, "sys", "user");
        assert!((request.effective_temperature() - 0.8).abs() < f32::EPSILON);

        let request = request.with_temperature(0.1);
        assert!((request.effective_temperature() - 0.1).abs() < f32::EPSILON);
    }
}
