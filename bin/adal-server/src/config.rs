//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

use adal_assistant::AssistantConfig;
use adal_assistant::completion::anthropic::{self, AnthropicConfig};

/// Runtime configuration for adal-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set; without `ANTHROPIC_API_KEY` it
/// simply answers from the fallback table.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS allow list; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Mount Swagger UI at `/swagger-ui` (default: `true`).
    pub enable_swagger: bool,

    /// Completion credential. `None` disables the hosted model entirely.
    pub anthropic_api_key: Option<String>,

    pub anthropic_base_url: String,
    pub completion_model: String,
    pub completion_max_tokens: u32,
    pub completion_timeout: Duration,

    /// Simulated "thinking" pause before fallback replies.
    pub fallback_delay: Duration,

    /// Number of trailing messages forwarded to the model.
    pub history_window: usize,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        Self {
            bind_address: env_or("ADAL_BIND", "0.0.0.0:3000"),
            log_level: env_or("ADAL_LOG", "info"),
            log_json: flag("ADAL_LOG_JSON", false),
            cors_allowed_origins: non_empty(lookup("ADAL_CORS_ORIGINS")),
            enable_swagger: flag("ADAL_ENABLE_SWAGGER", true),
            anthropic_api_key: non_empty(lookup("ANTHROPIC_API_KEY")),
            anthropic_base_url: env_or("ADAL_ANTHROPIC_BASE_URL", anthropic::DEFAULT_BASE_URL),
            completion_model: env_or("ADAL_COMPLETION_MODEL", anthropic::DEFAULT_MODEL),
            completion_max_tokens: parse_or(
                &lookup,
                "ADAL_COMPLETION_MAX_TOKENS",
                anthropic::DEFAULT_MAX_TOKENS,
            ),
            completion_timeout: Duration::from_secs(parse_or(
                &lookup,
                "ADAL_COMPLETION_TIMEOUT_SECS",
                anthropic::DEFAULT_TIMEOUT.as_secs(),
            )),
            fallback_delay: Duration::from_millis(parse_or(&lookup, "ADAL_FALLBACK_DELAY_MS", 1000)),
            history_window: parse_or(
                &lookup,
                "ADAL_HISTORY_WINDOW",
                adal_assistant::history::DEFAULT_HISTORY_WINDOW,
            ),
        }
    }

    pub fn anthropic_config(&self) -> AnthropicConfig {
        AnthropicConfig {
            base_url: self.anthropic_base_url.clone(),
            model: self.completion_model.clone(),
            max_tokens: self.completion_max_tokens,
            timeout: self.completion_timeout,
            ..AnthropicConfig::default()
        }
    }

    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            fallback_delay: self.fallback_delay,
            history_window: self.history_window,
            ..AssistantConfig::default()
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.bind_address, "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.log_json);
        assert!(cfg.enable_swagger);
        assert!(cfg.anthropic_api_key.is_none());
        assert_eq!(cfg.completion_model, "claude-3-5-sonnet-20241022");
        assert_eq!(cfg.completion_max_tokens, 1024);
        assert_eq!(cfg.completion_timeout, Duration::from_secs(30));
        assert_eq!(cfg.fallback_delay, Duration::from_millis(1000));
        assert_eq!(cfg.history_window, 20);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config_from(&[
            ("ADAL_BIND", "127.0.0.1:8080"),
            ("ADAL_LOG_JSON", "TRUE"),
            ("ADAL_ENABLE_SWAGGER", "false"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ADAL_FALLBACK_DELAY_MS", "0"),
            ("ADAL_COMPLETION_TIMEOUT_SECS", "5"),
            ("ADAL_HISTORY_WINDOW", "4"),
        ]);
        assert_eq!(cfg.bind_address, "127.0.0.1:8080");
        assert!(cfg.log_json);
        assert!(!cfg.enable_swagger);
        assert_eq!(cfg.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.assistant_config().fallback_delay, Duration::ZERO);
        assert_eq!(cfg.assistant_config().history_window, 4);
        assert_eq!(cfg.anthropic_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_key_counts_as_absent_and_bad_numbers_use_defaults() {
        let cfg = config_from(&[("ANTHROPIC_API_KEY", "  "), ("ADAL_HISTORY_WINDOW", "lots")]);
        assert!(cfg.anthropic_api_key.is_none());
        assert_eq!(cfg.history_window, 20);
    }
}
