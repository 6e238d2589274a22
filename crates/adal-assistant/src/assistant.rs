//! Reply pipeline: try the hosted model, otherwise answer from the keyword table.

use std::sync::Arc;
use std::time::Duration;

use adal_types::{Message, Usage};
use tracing::{debug, info, warn};

use crate::completion::{Completion, CompletionClient, CompletionError};
use crate::fallback::{self, FALLBACK_USAGE, Topic};
use crate::history::{self, DEFAULT_HISTORY_WINDOW};
use crate::prompt::SYSTEM_PROMPT;

pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Pause before a fallback reply is returned ("thinking" time).
    pub fallback_delay: Duration,
    /// Trailing messages forwarded upstream.
    pub history_window: usize,
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            fallback_delay: DEFAULT_FALLBACK_DELAY,
            history_window: DEFAULT_HISTORY_WINDOW,
            system_prompt: SYSTEM_PROMPT.to_owned(),
        }
    }
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Completion,
    Fallback(Topic),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub usage: Usage,
    pub source: ReplySource,
}

/// Produces one assistant reply per conversation; holds no per-request state.
#[derive(Clone)]
pub struct Assistant {
    client: Option<Arc<dyn CompletionClient>>,
    config: AssistantConfig,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("backend", &self.backend_name())
            .field("config", &self.config)
            .finish()
    }
}

impl Assistant {
    /// `client` is `None` when no completion credential is configured.
    pub fn new(client: Option<Arc<dyn CompletionClient>>, config: AssistantConfig) -> Self {
        Self { client, config }
    }

    pub fn fallback_only(config: AssistantConfig) -> Self {
        Self::new(None, config)
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.client
            .as_deref()
            .map(|c| c.name())
            .unwrap_or("fallback-only")
    }

    /// Always returns a reply; completion failures are logged and replaced
    /// by the fallback responder's answer to the last message.
    pub async fn reply(&self, messages: &[Message]) -> Reply {
        match self.try_complete(messages).await {
            Ok(Completion { text, usage }) => {
                info!(
                    backend = self.backend_name(),
                    output_len = text.len(),
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "completion succeeded"
                );
                Reply {
                    text,
                    usage,
                    source: ReplySource::Completion,
                }
            }
            Err(e) => {
                match &e {
                    CompletionError::MissingCredential | CompletionError::EmptyHistory => {
                        debug!(reason = e.kind(), "skipping hosted completion")
                    }
                    _ => warn!(reason = e.kind(), error = %e, "completion failed, falling back"),
                }
                self.fallback(messages).await
            }
        }
    }

    async fn try_complete(&self, messages: &[Message]) -> Result<Completion, CompletionError> {
        let client = self
            .client
            .as_ref()
            .ok_or(CompletionError::MissingCredential)?;
        let window = history::window(messages, self.config.history_window);
        if window.is_empty() {
            return Err(CompletionError::EmptyHistory);
        }
        debug!(
            total = messages.len(),
            forwarded = window.len(),
            "forwarding conversation window"
        );
        client.complete(&self.config.system_prompt, window).await
    }

    async fn fallback(&self, messages: &[Message]) -> Reply {
        let question = history::last_content(messages);
        let topic = fallback::classify(question);
        let text = fallback::respond(question);
        info!(topic = topic.as_str(), question_len = question.len(), "answering from fallback table");

        if !self.config.fallback_delay.is_zero() {
            tokio::time::sleep(self.config.fallback_delay).await;
        }

        Reply {
            text,
            usage: FALLBACK_USAGE,
            source: ReplySource::Fallback(topic),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
