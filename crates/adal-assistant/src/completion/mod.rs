//! Hosted completion clients.
//!
//! [`CompletionClient`] is the seam between the reply pipeline and the remote
//! model. Every failure is reported as a [`CompletionError`]; callers treat
//! all variants the same way (the completion is unavailable) and fall back
//! to the local responder.

pub mod anthropic;

use std::time::Duration;

use adal_types::{Message, Usage};
use async_trait::async_trait;
use thiserror::Error;

pub use anthropic::{AnthropicClient, AnthropicConfig};

/// Text generated by the remote model, with its token accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

/// Reasons a hosted completion could not be produced.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No credential is configured, so no attempt was made.
    #[error("no completion credential configured")]
    MissingCredential,

    /// Nothing left to send once the history window was applied.
    #[error("conversation has no user turn to complete")]
    EmptyHistory,

    /// The request did not finish within the configured timeout.
    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body-read failure.
    #[error("completion transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed completion response: {0}")]
    Malformed(String),

    /// The response contained no text content block.
    #[error("completion response contained no text block")]
    EmptyResponse,
}

impl CompletionError {
    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::MissingCredential => "missing_credential",
            CompletionError::EmptyHistory => "empty_history",
            CompletionError::Timeout(_) => "timeout",
            CompletionError::Transport(_) => "transport",
            CompletionError::Status { .. } => "status",
            CompletionError::Malformed(_) => "malformed",
            CompletionError::EmptyResponse => "empty_response",
        }
    }
}

/// A remote model that turns a system prompt plus history into one reply.
///
/// Implementations make exactly one attempt per call and never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync + 'static {
    /// Identifier used in logs and the health endpoint.
    fn name(&self) -> &str;

    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<Completion, CompletionError>;
}
