//! LLM provider abstraction
//!
//! The chat-completion service is an external collaborator. Everything else
//! in the crate talks to it through [`LlmService`] only.

mod error;
mod ollama;
mod openai;
mod registry;
mod retry;
mod types;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // LlmErrorKind is matched on in tests
pub use error::{LlmError, LlmErrorKind};
pub use registry::{build_service, LlmConfig};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// A chat-completion backend the trivia host can talk to
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Send the system prompt and turn messages, get the host's reply
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Model name reported by `/version` and in logs
    fn model_id(&self) -> &str;
}

/// Records one log line per collaborator call, success or failure
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let started = Instant::now();
        let result = self.inner.complete(request).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(response) => tracing::info!(
                model = %self.inner.model_id(),
                elapsed_ms = %elapsed_ms,
                turn_messages = request.messages.len(),
                reply_chars = response.text.chars().count(),
                prompt_tokens = response.usage.input_tokens,
                reply_tokens = response.usage.output_tokens,
                "Host reply received"
            ),
            Err(e) => tracing::error!(
                model = %self.inner.model_id(),
                elapsed_ms = %elapsed_ms,
                kind = ?e.kind,
                error = %e.message,
                "Host reply failed"
            ),
        }

        result
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
