//! Bounded retry for rate-limited provider calls
//!
//! Only throttling is retried; every other failure aborts on the first
//! attempt. The delay is a fixed policy constant matched to the provider's
//! coarse rate-limit windows, not derived from response headers.

use std::time::Duration;

use tracing::warn;

use crate::domain::{CompletionProvider, DomainError, RenderedPrompt, StepId, WorkflowError};

/// Retries allowed after the initial attempt
const MAX_RATE_LIMIT_RETRIES: u32 = 2;

/// Fixed pause between rate-limited attempts
const RATE_LIMIT_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Retry policy wrapping a single provider call
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RATE_LIMIT_RETRIES,
            retry_delay: RATE_LIMIT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Run one step completion with bounded rate-limit retries
    ///
    /// Exhausted throttling surfaces as [`WorkflowError::RateLimitExceeded`];
    /// any other failure surfaces immediately as
    /// [`WorkflowError::StepExecution`].
    pub async fn complete_with_retry(
        &self,
        provider: &dyn CompletionProvider,
        step: StepId,
        prompt: &RenderedPrompt,
    ) -> Result<String, WorkflowError> {
        for attempt in 0..=self.max_retries {
            match provider.complete(prompt).await {
                Ok(output) => return Ok(output),
                Err(DomainError::RateLimited { message }) => {
                    if attempt == self.max_retries {
                        warn!(step = %step, "Rate limited on final attempt, giving up");
                        return Err(WorkflowError::rate_limit_exceeded(step));
                    }

                    warn!(
                        step = %step,
                        attempt = attempt + 1,
                        delay_secs = self.retry_delay.as_secs(),
                        %message,
                        "Rate limited, retrying after delay"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(error) => {
                    return Err(WorkflowError::step_execution(step, error.to_string()));
                }
            }
        }

        // The loop always returns; max_retries + 1 attempts were made
        Err(WorkflowError::rate_limit_exceeded(step))
    }
}
