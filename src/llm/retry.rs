//! Bounded timeout and retry around a provider
//!
//! Each attempt gets its own deadline. Retryable failures are retried with
//! exponential backoff; everything else is returned at once.

use super::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Timeout and retry limits for collaborator calls
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): base, 2x base, 4x base...
    ///
    /// A provider's `retry_after` replaces the backoff. Either way the wait
    /// never exceeds one attempt's timeout.
    fn delay(&self, attempt: u32, error: &LlmError) -> Duration {
        error
            .retry_after
            .unwrap_or_else(|| self.base_delay * (1_u32 << (attempt - 1).min(6)))
            .min(self.timeout)
    }
}

/// Wraps a service with the limits of a [`RetryPolicy`]
pub struct RetryingService {
    inner: Arc<dyn LlmService>,
    policy: RetryPolicy,
}

impl RetryingService {
    pub fn new(inner: Arc<dyn LlmService>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn attempt(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        match tokio::time::timeout(self.policy.timeout, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::timeout(format!(
                "No completion within {}s",
                self.policy.timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl LlmService for RetryingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut retries = 0;
        loop {
            match self.attempt(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.kind.is_retryable() && retries < self.policy.max_retries => {
                    retries += 1;
                    let delay = self.policy.delay(retries, &e);
                    tracing::warn!(
                        model = %self.inner.model_id(),
                        attempt = retries,
                        delay_ms = %delay.as_millis(),
                        error = %e.message,
                        "Retrying LLM request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
