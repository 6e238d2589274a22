//! Health / heartbeat endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Heartbeat endpoint.
///
/// Returns `{"status": "ok", "version": "...", "completion": "..."}` where
/// `completion` names the hosted backend, or `"fallback-only"` when no
/// credential is configured.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status":     "ok",
        "version":    env!("CARGO_PKG_VERSION"),
        "completion": state.assistant.backend_name(),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::routes::testing::fallback_state;

    #[tokio::test]
    async fn health_response_has_ok_status() {
        let Json(body) = get_health(State(fallback_state())).await;
        assert_eq!(body["status"], "ok");
        assert!(!body["version"].as_str().unwrap_or("").is_empty());
    }

    #[tokio::test]
    async fn health_reports_fallback_only_without_key() {
        let Json(body) = get_health(State(fallback_state())).await;
        assert_eq!(body["completion"], "fallback-only");
    }
}
