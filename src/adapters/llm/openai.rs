//! OpenAI chat completions adapter.
//!
//! Talks to `/chat/completions` on any OpenAI-compatible endpoint. Model and
//! temperature are chosen per agent role unless the request overrides them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::adapters::llm::retry::RetryPolicy;
use crate::domain::models::{OpenAiConfig, RoleModels};
use crate::domain::ports::{AgentRole, CompletionRequest, LlmClient, LlmError, ResponseFormat};
use crate::infrastructure::logging::scrub_secrets;

const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Configuration for the OpenAI chat client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key. Falls back to `OPENAI_API_KEY` env var.
    pub api_key: Option<String>,
    /// Base URL for the API. Default: `https://api.openai.com/v1`.
    pub base_url: String,
    /// Request timeout in seconds. Default: 120.
    pub timeout_secs: u64,
    pub models: RoleModels,
    pub retry: RetryPolicy,
}

impl Default for OpenAiClientConfig {
    fn default() -> Self {
        Self::from(&OpenAiConfig::default())
    }
}

impl From<&OpenAiConfig> for OpenAiClientConfig {
    fn from(config: &OpenAiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            models: config.models.clone(),
            retry: RetryPolicy::new(
                config.max_retries,
                config.initial_backoff_ms,
                config.max_backoff_ms,
            ),
        }
    }
}

impl OpenAiClientConfig {
    fn get_api_key(&self) -> Result<String, LlmError> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                LlmError::NotConfigured(
                    "OpenAI API key not set. Set OPENAI_API_KEY or configure openai.api_key."
                        .to_string(),
                )
            })
    }

    fn model_for(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::Scout => &self.models.scout,
            AgentRole::Writer => &self.models.writer,
            AgentRole::Validator => &self.models.validator,
        }
    }
}

/// OpenAI chat completion client.
pub struct OpenAiClient {
    config: OpenAiClientConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: request
                .model
                .as_deref()
                .unwrap_or_else(|| self.config.model_for(request.role)),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            temperature: request.effective_temperature(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            response_format: request.response_format.as_ref().map(|format| match format {
                ResponseFormat::JsonSchema { name, schema } => ChatResponseFormat {
                    kind: "json_schema",
                    json_schema: JsonSchemaSpec {
                        name,
                        schema,
                        strict: true,
                    },
                },
            }),
        }
    }

    async fn send_once(&self, api_key: &str, body: &ChatRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(map_status(status.as_u16(), scrub_secrets(&text)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse completion: {e}")))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("completion has no choices".to_string()))?
            .message;

        if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
            return Err(LlmError::InvalidResponse(format!("model refused: {refusal}")));
        }

        message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("completion has no content".to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Network(err.to_string())
    }
}

fn map_status(status: u16, body: String) -> LlmError {
    match status {
        400 => LlmError::InvalidRequest(body),
        401 | 403 => LlmError::Authentication(body),
        429 => LlmError::RateLimited,
        500..=599 => LlmError::Server {
            status,
            message: body,
        },
        _ => LlmError::Unexpected {
            status,
            message: body,
        },
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip(self, request), fields(role = %request.role))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.config.get_api_key()?;
        let body = self.build_body(&request);
        debug!(model = body.model, temperature = body.temperature, "Sending chat completion");

        self.config
            .retry
            .execute(|| self.send_once(&api_key, &body))
            .await
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ChatResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaSpec<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaSpec<'a> {
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}
