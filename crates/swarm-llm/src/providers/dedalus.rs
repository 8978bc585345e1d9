//! Dedalus provider implementation
//!
//! Dedalus exposes an OpenAI-compatible chat-completions endpoint that routes
//! `vendor/model` identifiers (e.g. "openai/gpt-5",
//! "anthropic/claude-sonnet-4-20250514") to the underlying vendor, and
//! accepts an additional `mcp_servers` array naming hosted search tools the
//! model may call during generation.

use crate::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, Result, Role, StopReason,
    TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_DEDALUS_API_BASE: &str = "https://api.dedaluslabs.ai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the Dedalus provider
#[derive(Debug, Clone)]
pub struct DedalusConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Dedalus API
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DedalusConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_DEDALUS_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `DEDALUS_API_KEY` and optionally the base URL
    /// from `DEDALUS_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEDALUS_API_KEY").map_err(|_| {
            crate::LlmError::ConfigurationError(
                "DEDALUS_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_base = std::env::var("DEDALUS_API_BASE")
            .unwrap_or_else(|_| DEFAULT_DEDALUS_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Dedalus provider
pub struct DedalusProvider {
    client: Client,
    config: DedalusConfig,
}

impl DedalusProvider {
    /// Create a new Dedalus provider with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(DedalusConfig::new(api_key))
    }

    /// Create a provider with a custom configuration
    pub fn with_config(config: DedalusConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider from the `DEDALUS_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(DedalusConfig::from_env()?)
    }
}

#[async_trait]
impl LLMProvider for DedalusProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Dedalus API");

        let wire_request = ChatRequest {
            model: request.model.clone(),
            messages: build_chat_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            mcp_servers: request.mcp_servers,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LlmError::AuthenticationFailed,
                429 => crate::LlmError::RateLimitExceeded(error_text),
                400 => crate::LlmError::InvalidRequest(error_text),
                404 => crate::LlmError::ModelNotFound(request.model),
                _ => crate::LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            crate::LlmError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| crate::LlmError::UnexpectedResponse("No choices in response".to_string()))?;

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            choice.finish_reason, chat_response.usage.prompt_tokens, chat_response.usage.completion_tokens
        );

        Ok(CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: choice.message.content.unwrap_or_default(),
            },
            stop_reason: match choice.finish_reason.as_str() {
                "length" => StopReason::MaxTokens,
                "stop" => StopReason::EndTurn,
                other => {
                    debug!("Unknown finish reason: {}", other);
                    StopReason::EndTurn
                }
            },
            usage: TokenUsage {
                input_tokens: chat_response.usage.prompt_tokens,
                output_tokens: chat_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "dedalus"
    }
}

/// Fold the optional system prompt into the wire message array
///
/// Dedalus follows the OpenAI convention: system messages go first in the
/// messages array rather than a dedicated request field.
fn build_chat_messages(system: Option<String>, messages: Vec<Message>) -> Vec<ChatMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);

    if let Some(sys) = system {
        result.push(ChatMessage {
            role: "system".to_string(),
            content: sys,
        });
    }

    for msg in messages {
        result.push(ChatMessage {
            role: match msg.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            }
            .to_string(),
            content: msg.content,
        });
    }

    result
}

// Dedalus-specific wire types
// These match the OpenAI-compatible API format plus the mcp_servers extension

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mcp_servers: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = DedalusProvider::new("test-key");
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "dedalus");
    }

    #[test]
    fn test_config_defaults() {
        let config = DedalusConfig::new("test-key");
        assert_eq!(config.api_base, DEFAULT_DEDALUS_API_BASE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let config = config
            .with_api_base("http://localhost:8000/v1")
            .with_timeout(60);
        assert_eq!(config.api_base, "http://localhost:8000/v1");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_system_prompt_folded_into_messages() {
        let messages = build_chat_messages(
            Some("You are a judge".to_string()),
            vec![Message::user("TSLA"), Message::assistant("draft")],
        );

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
    }

    #[test]
    fn test_request_serialization_includes_mcp_servers() {
        let request = ChatRequest {
            model: "openai/gpt-5".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Analyze TSLA".to_string(),
            }],
            max_tokens: 1024,
            temperature: None,
            mcp_servers: Some(vec!["windsor/brave-search-mcp".to_string()]),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["mcp_servers"][0], "windsor/brave-search-mcp");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "choices": [
                {
                    "message": {"role": "assistant", "content": "BUY with conviction 7"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let choice = &parsed.choices[0];
        assert_eq!(choice.message.content.as_deref(), Some("BUY with conviction 7"));
        assert_eq!(choice.finish_reason, "stop");
        assert_eq!(parsed.usage.prompt_tokens, 120);
    }
}
