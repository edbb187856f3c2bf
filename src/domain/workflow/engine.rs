//! Workflow engine contract

use std::fmt::Debug;

use async_trait::async_trait;

use super::{StepOutput, WorkflowRequest};
use crate::domain::step::StepId;
use crate::domain::DomainError;

/// The result of executing a workflow, before persistence
///
/// `outputs` is always a prefix of `steps`: a step failure records an
/// error-text output for that step and truncates the rest.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The validated step sequence as requested
    pub steps: Vec<StepId>,
    /// One output per attempted step, in order
    pub outputs: Vec<StepOutput>,
}

/// Sequential step-chaining controller
///
/// Validates the request, then runs each step through the catalog + retry +
/// provider chain, feeding each step's output into the next. `Err` is
/// reserved for validation failures; step failures degrade into error-text
/// outputs inside an `Ok` outcome.
#[async_trait]
pub trait WorkflowEngine: Send + Sync + Debug {
    async fn execute(&self, request: &WorkflowRequest) -> Result<RunOutcome, DomainError>;
}
