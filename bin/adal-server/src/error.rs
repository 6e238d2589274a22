//! Unified server error type.
//!
//! Handlers return `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are converted to the chat
//! endpoint's JSON envelope:
//!
//! - 400 `{ "error": "..." }` for malformed requests
//! - 500 `{ "error": "Failed to process request", "details": "..." }` otherwise
//!
//! Completion failures never reach this type; the assistant recovers from
//! them with the fallback responder.

use adal_types::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Generic message returned with every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to process request";

/// All errors that can occur in the adal-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An unexpected failure while handling the request.
    #[error("internal error: {details}")]
    Internal { details: String },
}

impl ServerError {
    pub fn internal(details: impl Into<String>) -> Self {
        ServerError::Internal {
            details: details.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ServerError::BadRequest(message) => {
                warn!(%message, "rejecting request");
                ErrorBody {
                    error: message,
                    details: None,
                }
            }
            ServerError::Internal { details } => {
                error!(%details, "request failed");
                ErrorBody {
                    error: INTERNAL_ERROR_MESSAGE.to_owned(),
                    details: Some(if details.is_empty() {
                        "Please try again.".to_owned()
                    } else {
                        details
                    }),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
