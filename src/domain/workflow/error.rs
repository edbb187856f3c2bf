//! Step-level execution errors
//!
//! These never escape the engine: each one is rendered into the failing
//! step's output text and the run continues as a recorded partial result.

use thiserror::Error;

use crate::domain::step::StepId;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The provider kept throttling after every allowed retry
    #[error(
        "Rate limit exceeded for step {step}: the provider is throttling requests. \
         Please wait a minute and try again."
    )]
    RateLimitExceeded { step: StepId },

    /// Any non-retryable failure while executing a step
    #[error("Failed to execute step {step}: {message}")]
    StepExecution { step: StepId, message: String },
}

impl WorkflowError {
    pub fn rate_limit_exceeded(step: StepId) -> Self {
        Self::RateLimitExceeded { step }
    }

    pub fn step_execution(step: StepId, message: impl Into<String>) -> Self {
        Self::StepExecution {
            step,
            message: message.into(),
        }
    }

    /// The step this error occurred on
    pub fn step(&self) -> StepId {
        match self {
            Self::RateLimitExceeded { step } => *step,
            Self::StepExecution { step, .. } => *step,
        }
    }
}
