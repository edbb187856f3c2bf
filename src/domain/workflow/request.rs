//! Workflow run requests and boundary validation

use serde::{Deserialize, Serialize};

use crate::domain::step::StepId;
use crate::domain::DomainError;

/// Minimum number of steps in a workflow
pub const MIN_STEPS: usize = 2;
/// Maximum number of steps in a workflow
pub const MAX_STEPS: usize = 4;

/// A request to execute a workflow against some input text
///
/// Steps arrive as wire strings; [`validate`](WorkflowRequest::validate) is
/// the single point where they become typed step ids. Invalid requests never
/// reach execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    #[serde(default)]
    pub input_text: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl WorkflowRequest {
    pub fn new(input_text: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            input_text: input_text.into(),
            steps,
        }
    }

    /// Validate the request, returning the typed step sequence
    ///
    /// Duplicated steps are permitted; order is preserved.
    pub fn validate(&self) -> Result<Vec<StepId>, DomainError> {
        if self.input_text.is_empty() {
            return Err(DomainError::validation(
                "inputText is required and must be a non-empty string",
            ));
        }

        if self.steps.len() < MIN_STEPS || self.steps.len() > MAX_STEPS {
            return Err(DomainError::validation(format!(
                "steps must contain between {} and {} items",
                MIN_STEPS, MAX_STEPS
            )));
        }

        let invalid: Vec<&str> = self
            .steps
            .iter()
            .filter(|s| StepId::parse(s).is_none())
            .map(String::as_str)
            .collect();

        if !invalid.is_empty() {
            return Err(DomainError::validation(format!(
                "Invalid steps: {}",
                invalid.join(", ")
            )));
        }

        // Unwrap-free second pass: every name parsed above
        Ok(self
            .steps
            .iter()
            .filter_map(|s| StepId::parse(s))
            .collect())
    }
}
