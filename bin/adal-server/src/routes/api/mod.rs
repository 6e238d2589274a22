pub mod claude;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().merge(claude::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct Api;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut spec = Api::openapi();
    spec.merge(claude::AssistantApi::openapi());
    spec
}
