//! Assistant chat route (`/api/claude`).
//!
//! POST validates the message list and hands it to the [`Assistant`], which
//! tries the hosted model and falls back to the keyword table. Completion
//! failures are therefore never visible here: every well-formed request gets
//! a 200 reply.
//!
//! [`Assistant`]: adal_assistant::Assistant

use std::sync::Arc;

use adal_assistant::history;
use adal_types::{ChatRequest, ChatResponse, ErrorBody, Message, ProbeResponse, Usage};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

pub const MESSAGES_REQUIRED: &str = "Messages array is required";

#[derive(OpenApi)]
#[openapi(
    paths(post_chat, probe),
    components(schemas(ChatRequest, ChatResponse, Message, Usage, ErrorBody, ProbeResponse))
)]
pub struct AssistantApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/claude", get(probe).post(post_chat))
}

/// Ask the assistant for the next reply (`POST /api/claude`).
///
/// The body must be a JSON object whose `messages` field is an array of
/// `{ role, content }` entries. The reply is answered from the last entry.
#[utoipa::path(
    post,
    path = "/api/claude",
    tag = "assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Missing or invalid messages", body = ErrorBody),
        (status = 500, description = "Request could not be processed", body = ErrorBody),
    )
)]
pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ServerError> {
    let messages = parse_messages(&body)?;
    info!(
        messages = messages.len(),
        question_len = history::last_content(&messages).len(),
        "processing assistant request"
    );

    let reply = state.assistant.reply(&messages).await;
    debug!(source = ?reply.source, "assistant replied");

    Ok(Json(ChatResponse {
        response: reply.text,
        usage: reply.usage,
    }))
}

/// Manual-inspection stub (`GET /api/claude`). Does no work.
#[utoipa::path(
    get,
    path = "/api/claude",
    tag = "assistant",
    responses(
        (status = 200, description = "Endpoint is reachable", body = ProbeResponse)
    )
)]
pub async fn probe() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        message: "Claude API endpoint is working!".to_owned(),
        note: "Use POST method to send messages".to_owned(),
    })
}

/// Extract the message list from a raw request body.
///
/// Unparseable JSON is an internal error (500); a missing or non-array
/// `messages` field, or an entry that is not a valid message, is a 400.
fn parse_messages(body: &[u8]) -> Result<Vec<Message>, ServerError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ServerError::internal(e.to_string()))?;

    let Some(items) = value.get("messages").and_then(Value::as_array) else {
        return Err(ServerError::BadRequest(MESSAGES_REQUIRED.to_owned()));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Message::deserialize(item)
                .map_err(|e| ServerError::BadRequest(format!("invalid message at index {i}: {e}")))
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::routes::testing::{app_with, call, fallback_app, get_json, post_json, post_raw};
    use adal_assistant::completion::{Completion, CompletionClient, CompletionError};
    use adal_assistant::fallback;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    struct CountingClient {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CompletionClient for CountingClient {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            _system: &str,
            _messages: &[Message],
        ) -> Result<Completion, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CompletionError::Malformed("truncated".into()))
            } else {
                Ok(Completion {
                    text: "model says hi".into(),
                    usage: Usage {
                        input_tokens: 11,
                        output_tokens: 5,
                    },
                })
            }
        }
    }

    fn counting(fail: bool) -> Arc<CountingClient> {
        Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    #[tokio::test]
    async fn greeting_without_credential() {
        let (status, body) = call(
            fallback_app(),
            post_json(json!({ "messages": [{ "role": "user", "content": "Hi there" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], fallback::GREETING);
        assert_eq!(body["usage"], json!({ "input_tokens": 50, "output_tokens": 200 }));
    }

    #[tokio::test]
    async fn programming_question_without_credential() {
        let (status, body) = call(
            fallback_app(),
            post_json(json!({ "messages": [{ "role": "user", "content": "what is javascript" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], fallback::PROGRAMMING);
    }

    #[tokio::test]
    async fn answers_from_the_last_message() {
        let (_, body) = call(
            fallback_app(),
            post_json(json!({ "messages": [
                { "role": "assistant", "content": "👋 Hi! I'm Adal AI Assistant." },
                { "role": "user", "content": "why does the community matter?" }
            ] })),
        )
        .await;
        assert_eq!(body["response"], fallback::COMMUNITY);
    }

    #[tokio::test]
    async fn non_array_messages_are_rejected_without_calling_upstream() {
        let client = counting(false);
        for payload in [
            json!({ "messages": { "role": "user", "content": "hi" } }),
            json!({ "messages": null }),
            json!({ "messages": "hello" }),
            json!({}),
            json!([1, 2, 3]),
        ] {
            let (status, body) = call(app_with(Some(client.clone())), post_json(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": MESSAGES_REQUIRED }));
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_entries_are_rejected() {
        let (status, body) = call(
            fallback_app(),
            post_json(json!({ "messages": [{ "role": "system", "content": "x" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("index 0"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_internal_error() {
        let (status, body) = call(fallback_app(), post_raw("{\"messages\": [")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process request");
        assert!(!body["details"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn model_reply_is_passed_through() {
        let client = counting(false);
        let (status, body) = call(
            app_with(Some(client.clone())),
            post_json(json!({ "messages": [{ "role": "user", "content": "hello" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "model says hi");
        assert_eq!(body["usage"], json!({ "input_tokens": 11, "output_tokens": 5 }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_failure_falls_back() {
        let client = counting(true);
        let (status, body) = call(
            app_with(Some(client.clone())),
            post_json(json!({ "messages": [{ "role": "user", "content": "hey" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], fallback::GREETING);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_history_gets_general_reply() {
        let (status, body) = call(fallback_app(), post_json(json!({ "messages": [] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], fallback::general_reply(""));
    }

    #[tokio::test]
    #[traced_test]
    async fn request_summary_is_logged() {
        call(
            fallback_app(),
            post_json(json!({ "messages": [{ "role": "user", "content": "secret plans" }] })),
        )
        .await;
        assert!(logs_contain("processing assistant request"));
        assert!(logs_contain("question_len=12"));
    }

    #[tokio::test]
    async fn get_returns_probe() {
        let (status, body) = call(fallback_app(), get_json("/api/claude")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "Claude API endpoint is working!",
                "note": "Use POST method to send messages"
            })
        );
    }
}
