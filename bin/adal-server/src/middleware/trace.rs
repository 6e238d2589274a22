use crate::state::AppState;
use adal_types::ErrorBody;
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Largest request body the server will buffer (axum's default body limit).
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

pub const BODY_TOO_LARGE: &str = "Request body too large";

/// Bodies at or above this size are summarised instead of logged.
const MAX_LOGGED_BODY: usize = 1024;

/// Routes whose bodies carry conversation text. Only size and type are logged.
const CONVERSATION_PATHS: &[&str] = &["/api/claude"];

/// Wraps each request in an `http_request` span keyed by a trace id.
///
/// The id is taken from an incoming `x-trace-id` header when it is a valid
/// UUID, otherwise generated, and echoed back on the response. Request bodies
/// are buffered up to [`MAX_REQUEST_BODY`]; larger ones are answered with 413
/// before reaching a handler.
pub async fn trace_middleware(
    State(_state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();
    let conversation = CONVERSATION_PATHS.contains(&req.uri().path());

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let (parts, body) = req.into_parts();

        let mut response = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                log_body("request", &parts.headers, &bytes, conversation);
                let mut req = Request::from_parts(parts, Body::from(bytes));
                if let Some(value) = &trace_header {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }
                next.run(req).await
            }
            Err(e) if e.is::<LengthLimitError>() => {
                warn!(limit = MAX_REQUEST_BODY, "request body too large");
                error_response(StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE)
            }
            Err(e) => {
                warn!(error = %e, "request body could not be read");
                error_response(StatusCode::BAD_REQUEST, "Request body could not be read")
            }
        };

        let (parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "response body could not be read");
                Bytes::new()
            }
        };
        log_body("response", &parts.headers, &res_bytes, conversation);
        response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(value) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorBody {
        error: message.to_owned(),
        details: None,
    };
    (status, Json(body)).into_response()
}

/// Log a buffered body. Conversation bodies and large or non-JSON bodies are
/// reduced to their type and size.
fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes, conversation: bool) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if bytes.is_empty() {
        return;
    }
    if conversation {
        info!(
            "{direction} body: [redacted: type={content_type}, size={}]",
            bytes.len()
        );
        return;
    }
    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            info!("{direction} body: {text}");
            return;
        }
    }
    info!(
        "{direction} body: [skipped: type={content_type}, size={}]",
        bytes.len()
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::routes::testing::{call, fallback_app, get_json, post_json, post_raw};
    use serde_json::json;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn conversation_content_is_not_logged() {
        let (status, _) = call(
            fallback_app(),
            post_json(json!({ "messages": [{ "role": "user", "content": "secret plans" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!logs_contain("secret plans"));
        assert!(logs_contain("request body: [redacted: type=application/json"));
        assert!(logs_contain("response body: [redacted: type=application/json"));
    }

    #[tokio::test]
    #[traced_test]
    async fn small_json_bodies_of_other_routes_are_logged() {
        let (status, _) = call(fallback_app(), get_json("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(logs_contain("response body: {\"completion\":\"fallback-only\""));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_before_the_handler() {
        let (status, body) = call(fallback_app(), post_raw("x".repeat(MAX_REQUEST_BODY + 1))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": BODY_TOO_LARGE }));
    }
}
