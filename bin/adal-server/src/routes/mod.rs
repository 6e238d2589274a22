//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with `ADAL_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - `/api` routes (the assistant chat endpoint)

mod api;
pub mod doc;
mod health;

use axum::{Router, middleware};
use crate::middleware::{cors, trace};
use crate::state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .merge(health::router())
        .nest("/api", api::router());

    let mut app = Router::new().merge(api_router);

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}

// ── Test helpers ──────────────────────────────────────────────────────────────


#[cfg(test)]
mod test {
    use super::testing::*;
    use crate::config::Config;
    use crate::middleware::trace::X_TRACE_ID;
    use crate::state::AppState;
    use adal_assistant::Assistant;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn trace_id_is_echoed_or_generated() {
        let id = "6f1c2a4e-8b0d-4c3e-9f5a-1d2e3f4a5b6c";
        let req = Request::get("/health")
            .header(X_TRACE_ID, id)
            .body(Body::empty())
            .unwrap();
        let resp = fallback_app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[X_TRACE_ID], id);

        let resp = fallback_app().oneshot(get_json("/health")).await.unwrap();
        assert!(resp.headers().contains_key(X_TRACE_ID));
    }

    #[tokio::test]
    async fn swagger_is_mounted_only_when_enabled() {
        let resp = fallback_app()
            .oneshot(get_json("/api-docs/openapi.json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let config = Config::from_lookup(|_| None);
        let assistant = Assistant::fallback_only(config.assistant_config());
        let app = super::build(Arc::new(AppState::new(config, assistant)));
        let (status, doc) = call(app, get_json("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/claude"].is_object());
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed_by_default() {
        let req = Request::get("/health")
            .header("origin", "http://widget.example")
            .body(Body::empty())
            .unwrap();
        let resp = fallback_app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let (status, body) = call(fallback_app(), get_json("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
