//! Persisted workflow run entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::step::StepId;

/// The recorded result of one attempted step
///
/// Produced exactly once per attempted step, in step order. When a step fails
/// unrecoverably the output text carries the error message instead of model
/// output, so a partial run stays explainable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutput {
    pub step: StepId,
    pub output_text: String,
}

impl StepOutput {
    pub fn new(step: StepId, output_text: impl Into<String>) -> Self {
        Self {
            step,
            output_text: output_text.into(),
        }
    }
}

/// One execution of a workflow against a specific input
///
/// Immutable after creation; deleted only by retention-cap eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub id: Uuid,
    pub input_text: String,
    pub steps: Vec<StepId>,
    pub outputs: Vec<StepOutput>,
    pub created_at: DateTime<Utc>,
}

impl WorkflowRun {
    pub fn new(
        input_text: impl Into<String>,
        steps: Vec<StepId>,
        outputs: Vec<StepOutput>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            input_text: input_text.into(),
            steps,
            outputs,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_wire_format() {
        let run = WorkflowRun::new(
            "some input",
            vec![StepId::CleanText, StepId::Summarize],
            vec![
                StepOutput::new(StepId::CleanText, "cleaned"),
                StepOutput::new(StepId::Summarize, "summary"),
            ],
        );

        let json = serde_json::to_string(&run).unwrap();
        assert!(json.contains("\"inputText\":\"some input\""));
        assert!(json.contains("\"steps\":[\"clean_text\",\"summarize\"]"));
        assert!(json.contains("\"outputText\":\"cleaned\""));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_run_deserialization() {
        let json = r#"{
            "id": "4f9c6f3e-8d52-4f0b-9c1e-0a4a9b6f2d11",
            "inputText": "hello",
            "steps": ["summarize", "tag_category"],
            "outputs": [{"step": "summarize", "outputText": "a greeting"}],
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;

        let run: WorkflowRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.steps, vec![StepId::Summarize, StepId::TagCategory]);
        assert_eq!(run.outputs.len(), 1);
        assert_eq!(run.outputs[0].output_text, "a greeting");
    }

    #[test]
    fn test_runs_get_distinct_ids() {
        let a = WorkflowRun::new("x", vec![], vec![]);
        let b = WorkflowRun::new("x", vec![], vec![]);
        assert_ne!(a.id, b.id);
    }
}
