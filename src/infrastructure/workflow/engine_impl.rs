//! Workflow engine implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::step::{self, StepId};
use crate::domain::{
    CompletionProvider, DomainError, RunOutcome, StepOutput, WorkflowEngine, WorkflowError,
    WorkflowRequest,
};
use crate::infrastructure::llm::RetryPolicy;

/// Sequential step-chaining engine
///
/// Each step's output becomes the next step's input; a strict linear
/// pipeline. On the first step failure the error message is recorded as that
/// step's output and the remaining steps are not attempted.
#[derive(Debug)]
pub struct WorkflowEngineImpl {
    completion: Arc<dyn CompletionProvider>,
    retry: RetryPolicy,
}

impl WorkflowEngineImpl {
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            completion,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(completion: Arc<dyn CompletionProvider>, retry: RetryPolicy) -> Self {
        Self { completion, retry }
    }

    async fn run_step(&self, step: StepId, input_text: &str) -> Result<String, WorkflowError> {
        let prompt = step::render(step, input_text)
            .map_err(|e| WorkflowError::step_execution(step, e.to_string()))?;

        self.retry
            .complete_with_retry(self.completion.as_ref(), step, &prompt)
            .await
    }
}

#[async_trait]
impl WorkflowEngine for WorkflowEngineImpl {
    async fn execute(&self, request: &WorkflowRequest) -> Result<RunOutcome, DomainError> {
        let steps = request.validate()?;

        debug!(steps = ?steps, "Executing workflow");

        let mut outputs = Vec::with_capacity(steps.len());
        let mut current_text = request.input_text.clone();

        for &step in &steps {
            match self.run_step(step, &current_text).await {
                Ok(output_text) => {
                    debug!(step = %step, "Step succeeded");
                    outputs.push(StepOutput::new(step, output_text.clone()));
                    current_text = output_text;
                }
                Err(error) => {
                    warn!(step = %step, %error, "Step failed, stopping workflow");
                    outputs.push(StepOutput::new(step, format!("Error: {}", error)));
                    break;
                }
            }
        }

        Ok(RunOutcome { steps, outputs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RenderedPrompt;
    use std::sync::Mutex;

    /// Scripted completion provider that answers by matching on the user
    /// prompt and records every prompt it receives
    #[derive(Debug, Default)]
    struct ScriptedCompletion {
        script: Vec<(&'static str, Result<String, fn() -> DomainError>)>,
        prompts: Mutex<Vec<RenderedPrompt>>,
    }

    impl ScriptedCompletion {
        fn new() -> Self {
            Self::default()
        }

        fn on(mut self, user_fragment: &'static str, output: &str) -> Self {
            self.script.push((user_fragment, Ok(output.to_string())));
            self
        }

        fn failing_on(
            mut self,
            user_fragment: &'static str,
            error: fn() -> DomainError,
        ) -> Self {
            self.script.push((user_fragment, Err(error)));
            self
        }

        fn prompts(&self) -> Vec<RenderedPrompt> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedCompletion {
        async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, DomainError> {
            self.prompts.lock().unwrap().push(prompt.clone());

            for (fragment, result) in &self.script {
                if prompt.user.contains(fragment) {
                    return match result {
                        Ok(output) => Ok(output.clone()),
                        Err(error) => Err(error()),
                    };
                }
            }

            Err(DomainError::internal(format!(
                "no scripted response for prompt: {}",
                prompt.user
            )))
        }
    }

    fn engine(completion: ScriptedCompletion) -> WorkflowEngineImpl {
        WorkflowEngineImpl::with_retry_policy(
            Arc::new(completion),
            RetryPolicy::new(2, std::time::Duration::from_millis(0)),
        )
    }

    fn request(input: &str, steps: &[&str]) -> WorkflowRequest {
        WorkflowRequest::new(input, steps.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_two_step_pipeline_threads_output() {
        let completion = Arc::new(
            ScriptedCompletion::new()
                .on("Clean the following text", "hello world")
                .on("Summarize the following text", "A short greeting."),
        );
        let engine = WorkflowEngineImpl::with_retry_policy(
            completion.clone(),
            RetryPolicy::new(2, std::time::Duration::from_millis(0)),
        );

        let outcome = engine
            .execute(&request("  hello   world  ", &["clean_text", "summarize"]))
            .await
            .unwrap();

        assert_eq!(
            outcome.outputs,
            vec![
                StepOutput::new(StepId::CleanText, "hello world"),
                StepOutput::new(StepId::Summarize, "A short greeting."),
            ]
        );

        // The second step must see the cleaned text, not the raw input
        let prompts = completion.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].user.contains("hello world"));
        assert!(!prompts[1].user.contains("  hello   world  "));
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_steps() {
        let completion = ScriptedCompletion::new()
            .on("Clean the following text", "cleaned")
            .failing_on("Summarize the following text", || {
                DomainError::provider("openai", "HTTP 500: boom")
            });
        let engine = engine(completion);

        let outcome = engine
            .execute(&request(
                "input",
                &["clean_text", "summarize", "tag_category"],
            ))
            .await
            .unwrap();

        assert_eq!(outcome.steps.len(), 3);
        assert_eq!(outcome.outputs.len(), 2);
        assert_eq!(outcome.outputs[0].output_text, "cleaned");
        assert_eq!(
            outcome.outputs[1].output_text,
            "Error: Failed to execute step summarize: Provider error: openai - HTTP 500: boom"
        );
    }

    #[tokio::test]
    async fn test_first_step_failure_yields_single_error_output() {
        let completion = ScriptedCompletion::new()
            .failing_on("Clean the following text", || DomainError::EmptyResponse);
        let engine = engine(completion);

        let outcome = engine
            .execute(&request("input", &["clean_text", "summarize"]))
            .await
            .unwrap();

        assert_eq!(outcome.outputs.len(), 1);
        assert!(outcome.outputs[0]
            .output_text
            .starts_with("Error: Failed to execute step clean_text"));
    }

    #[tokio::test]
    async fn test_exhausted_rate_limit_becomes_error_output() {
        let completion = ScriptedCompletion::new()
            .on("Clean the following text", "cleaned")
            .failing_on("Summarize the following text", || {
                DomainError::rate_limited("HTTP 429: Too Many Requests")
            });
        let engine = engine(completion);

        let outcome = engine
            .execute(&request("input", &["clean_text", "summarize"]))
            .await
            .unwrap();

        assert_eq!(outcome.outputs.len(), 2);
        let message = &outcome.outputs[1].output_text;
        assert!(message.starts_with("Error: Rate limit exceeded for step summarize"));
        assert!(message.contains("wait a minute"));
    }

    #[tokio::test]
    async fn test_outputs_are_prefix_of_requested_steps() {
        let completion = ScriptedCompletion::new()
            .on("Clean the following text", "ok")
            .on("Summarize the following text", "ok")
            .failing_on("Extract key points", || {
                DomainError::provider("openai", "bad gateway")
            });
        let engine = engine(completion);

        let requested = ["clean_text", "summarize", "extract_key_points", "summarize"];
        let outcome = engine.execute(&request("input", &requested)).await.unwrap();

        assert!(outcome.outputs.len() <= requested.len());
        for (output, step) in outcome.outputs.iter().zip(&outcome.steps) {
            assert_eq!(output.step, *step);
        }
        assert_eq!(outcome.outputs.len(), 3);
    }

    #[tokio::test]
    async fn test_validation_error_reaches_caller() {
        let engine = engine(ScriptedCompletion::new());

        let result = engine.execute(&request("input", &["summarize"])).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = engine
            .execute(&request("input", &["summarize", "bogus_step"]))
            .await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("bogus_step"));
    }

    #[tokio::test]
    async fn test_no_provider_call_for_invalid_request() {
        let completion = Arc::new(ScriptedCompletion::new());
        let engine = WorkflowEngineImpl::new(completion.clone());

        let _ = engine.execute(&request("", &["clean_text", "summarize"])).await;
        assert!(completion.prompts().is_empty());
    }
}
