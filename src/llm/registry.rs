//! Provider selection from configuration

use super::ollama::{self, OllamaService};
use super::openai::{self, OpenAIService};
use super::retry::{RetryPolicy, RetryingService};
use super::{LlmError, LlmService, LoggingService};
use std::sync::Arc;
use std::time::Duration;

/// Which chat backend hosts the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Ollama,
    OpenAI,
}

impl Provider {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Some(Provider::Ollama),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }
}

/// Configuration for the LLM collaborator
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub ollama_host: String,
    pub ollama_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub retry: RetryPolicy,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            ollama_host: ollama::DEFAULT_HOST.to_string(),
            ollama_model: ollama::DEFAULT_MODEL.to_string(),
            openai_api_key: None,
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            openai_model: openai::DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let provider = match lookup("TRIVIA_LLM_PROVIDER") {
            Some(value) => Provider::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown TRIVIA_LLM_PROVIDER, using ollama");
                Provider::Ollama
            }),
            None => defaults.provider,
        };

        let retry = RetryPolicy {
            timeout: lookup("LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(defaults.retry.timeout, Duration::from_secs),
            max_retries: lookup("LLM_MAX_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry.max_retries),
            ..defaults.retry
        };

        Self {
            provider,
            ollama_host: lookup("OLLAMA_HOST").unwrap_or(defaults.ollama_host),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: lookup("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            retry,
        }
    }
}

/// Build the collaborator described by `config`, wrapped with logging and
/// the configured timeout/retry policy.
pub fn build_service(config: &LlmConfig) -> Result<Arc<dyn LlmService>, LlmError> {
    // Per-attempt deadline is enforced by the retry wrapper; the client
    // timeout is only a backstop.
    let client_timeout = config.retry.timeout + Duration::from_secs(5);

    let provider: Arc<dyn LlmService> = match config.provider {
        Provider::Ollama => Arc::new(OllamaService::new(
            &config.ollama_host,
            config.ollama_model.clone(),
            client_timeout,
        )?),
        Provider::OpenAI => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| LlmError::auth("OPENAI_API_KEY is not set"))?;
            Arc::new(OpenAIService::new(
                api_key,
                &config.openai_base_url,
                config.openai_model.clone(),
                client_timeout,
            )?)
        }
    };

    let logged: Arc<dyn LlmService> = Arc::new(LoggingService::new(provider));
    Ok(Arc::new(RetryingService::new(logged, config.retry)))
}
