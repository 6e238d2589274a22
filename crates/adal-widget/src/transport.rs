//! How the widget reaches the chat endpoint.

use adal_types::{ChatRequest, ErrorBody, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Path of the chat route on the server.
pub const DEFAULT_ENDPOINT: &str = "/api/claude";

/// A 2xx body from the chat endpoint. Every field is optional because the
/// widget must cope with partial or empty replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerReply {
    pub response: Option<String>,
    pub usage: Option<Usage>,
    pub error: Option<String>,
}

impl ServerReply {
    /// Read the fields leniently: a `response` that is not a string counts as
    /// missing, and any non-null `error` is kept as text.
    pub fn from_value(value: &Value) -> Self {
        let error = match value.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self {
            response: value
                .get("response")
                .and_then(Value::as_str)
                .map(str::to_owned),
            usage: value
                .get("usage")
                .and_then(|u| serde_json::from_value(u.clone()).ok()),
            error,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status; `details` is taken from the error envelope if present.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        error: Option<String>,
        details: Option<String>,
    },

    /// A 2xx body that carried an `error` field.
    #[error("{0}")]
    Server(String),
}

impl TransportError {
    /// Server-supplied failure detail, if the error envelope had one.
    pub fn details(&self) -> Option<&str> {
        match self {
            TransportError::Status { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

/// Delivers one chat request and returns the server's reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ServerReply, TransportError>;
}

/// [`ChatTransport`] over HTTP: `POST <base_url><endpoint>` with a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, endpoint: &str) -> Result<Self, TransportError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ServerReply, TransportError> {
        debug!(url = %self.url, messages = request.messages.len(), "posting chat request");

        let resp = self.http.post(&self.url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<ErrorBody>(&body).ok();
            return Err(TransportError::Status {
                status: status.as_u16(),
                error: envelope.as_ref().map(|e| e.error.clone()),
                details: envelope.and_then(|e| e.details),
            });
        }

        let reply = match serde_json::from_str::<Value>(&body) {
            Ok(value) => ServerReply::from_value(&value),
            Err(e) => {
                warn!(error = %e, size = body.len(), "unreadable reply body, treating as empty");
                ServerReply::default()
            }
        };
        match reply.error {
            Some(error) => Err(TransportError::Server(error)),
            None => Ok(reply),
        }
    }
}
