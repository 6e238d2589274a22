//! Anthropic Messages API client.

use std::fmt;
use std::time::Duration;

use adal_types::{Message, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Completion, CompletionClient, CompletionError};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const API_VERSION: &str = "2023-06-01";

/// Endpoint settings for [`AnthropicClient`].
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Scheme + host, without the `/v1/messages` suffix.
    pub base_url: String,
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Whole-request timeout. Expiry is reported as [`CompletionError::Timeout`].
    pub timeout: Duration,
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            api_version: API_VERSION.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Calls `POST {base_url}/v1/messages` once per completion.
#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    config: AnthropicConfig,
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, config: AnthropicConfig) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CompletionError::Transport)?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            config,
        })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.config.timeout)
        } else {
            CompletionError::Transport(e)
        }
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, CompletionError> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages,
        };

        debug!(model = %self.config.model, messages = messages.len(), "calling completion endpoint");

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|env| env.error.message)
                .unwrap_or(text);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::Malformed(e.to_string()))?;

        let text = parsed
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .ok_or(CompletionError::EmptyResponse)?;

        Ok(Completion {
            text,
            usage: parsed.usage,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
