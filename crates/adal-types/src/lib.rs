//! Wire types for the assistant chat endpoint.
//!
//! These structures are shared by `adal-server` (which serializes them) and
//! `adal-widget` (which sends and reads them), so both sides agree on the JSON
//! shape without duplicating definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Conversation ─────────────────────────────────────────────────────────────

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message role: {0:?} (expected \"user\" or \"assistant\")")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ── Chat endpoint ────────────────────────────────────────────────────────────

/// Token accounting returned with every reply.
///
/// Real counts when the reply came from the completion endpoint, a fixed
/// estimate when it came from the fallback responder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Request body for `POST /api/claude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    /// Full conversation so far, oldest first.
    pub messages: Vec<Message>,
}

/// Response body for a successful `POST /api/claude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatResponse {
    /// Assistant reply text.
    pub response: String,
    pub usage: Usage,
}

/// JSON error envelope for 4xx / 5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
    /// Extra detail, only present on internal failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body returned by `GET /api/claude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProbeResponse {
    pub message: String,
    pub note: String,
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::user("hi");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "role": "user", "content": "hi" })
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_value::<Message>(json!({ "role": "system", "content": "x" }));
        assert!(parsed.is_err());
        assert_eq!(
            "system".parse::<Role>(),
            Err(ParseRoleError("system".into()))
        );
    }

    #[test]
    fn error_body_omits_missing_details() {
        let body = ErrorBody {
            error: "Messages array is required".into(),
            details: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "error": "Messages array is required" })
        );
    }
}
