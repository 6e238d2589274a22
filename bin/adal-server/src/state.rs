//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use adal_assistant::{AnthropicClient, Assistant, CompletionClient, CompletionError};
use tracing::info;

use crate::config::Config;

/// State shared across all HTTP handlers. Immutable after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Reply pipeline used by the chat route.
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(config: Config, assistant: Assistant) -> Self {
        Self {
            config: Arc::new(config),
            assistant: Arc::new(assistant),
        }
    }

    /// Construct the assistant described by `config`.
    ///
    /// The hosted client is only created when a credential is present.
    pub fn from_config(config: Config) -> Result<Self, CompletionError> {
        let client: Option<Arc<dyn CompletionClient>> = match &config.anthropic_api_key {
            Some(key) => {
                let client = AnthropicClient::new(key.clone(), config.anthropic_config())?;
                info!(
                    model = %config.completion_model,
                    timeout_secs = config.completion_timeout.as_secs(),
                    "hosted completion enabled"
                );
                Some(Arc::new(client))
            }
            None => {
                info!("ANTHROPIC_API_KEY not set; answering from the fallback table only");
                None
            }
        };
        let assistant = Assistant::new(client, config.assistant_config());
        Ok(Self::new(config, assistant))
    }
}
