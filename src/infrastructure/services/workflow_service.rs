//! Workflow submission and history service
//!
//! Ties the engine to the run store: execute, persist, apply the retention
//! cap. The engine itself carries no storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::state::WorkflowServiceTrait;
use crate::domain::{
    DomainError, RunRepository, WorkflowEngine, WorkflowRequest, WorkflowRun, RUN_RETENTION_CAP,
};

#[derive(Debug)]
pub struct WorkflowService {
    engine: Arc<dyn WorkflowEngine>,
    runs: Arc<dyn RunRepository>,
}

impl WorkflowService {
    pub fn new(engine: Arc<dyn WorkflowEngine>, runs: Arc<dyn RunRepository>) -> Self {
        Self { engine, runs }
    }
}

#[async_trait]
impl WorkflowServiceTrait for WorkflowService {
    async fn submit_run(&self, request: WorkflowRequest) -> Result<WorkflowRun, DomainError> {
        let outcome = self.engine.execute(&request).await?;

        let completed = outcome.outputs.len() == outcome.steps.len();
        info!(
            steps = outcome.steps.len(),
            outputs = outcome.outputs.len(),
            completed,
            "Workflow run finished"
        );

        let run = WorkflowRun::new(request.input_text, outcome.steps, outcome.outputs);
        let run = self.runs.insert(run).await?;

        // The run is already persisted; a failed eviction leaves the store
        // over the advisory cap rather than failing the request.
        match self.runs.evict_oldest_beyond(RUN_RETENTION_CAP).await {
            Ok(0) => {}
            Ok(evicted) => debug!(evicted, "Evicted runs beyond retention cap"),
            Err(error) => warn!(%error, "Failed to evict old workflow runs"),
        }

        Ok(run)
    }

    async fn recent_runs(&self, limit: usize) -> Result<Vec<WorkflowRun>, DomainError> {
        self.runs.list_recent(limit).await
    }

    async fn store_connected(&self) -> bool {
        self.runs.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunOutcome, StepId, StepOutput};
    use crate::infrastructure::run_store::InMemoryRunRepository;

    /// Engine stub returning a fixed outcome without touching any provider
    #[derive(Debug)]
    struct FixedEngine {
        outputs: Vec<StepOutput>,
    }

    #[async_trait]
    impl WorkflowEngine for FixedEngine {
        async fn execute(&self, request: &WorkflowRequest) -> Result<RunOutcome, DomainError> {
            let steps = request.validate()?;
            Ok(RunOutcome {
                steps,
                outputs: self.outputs.clone(),
            })
        }
    }

    fn service(outputs: Vec<StepOutput>) -> (WorkflowService, Arc<InMemoryRunRepository>) {
        let runs = Arc::new(InMemoryRunRepository::new());
        let engine = Arc::new(FixedEngine { outputs });
        (WorkflowService::new(engine, runs.clone()), runs)
    }

    fn request(input: &str) -> WorkflowRequest {
        WorkflowRequest::new(
            input,
            vec!["clean_text".to_string(), "summarize".to_string()],
        )
    }

    #[tokio::test]
    async fn test_submit_run_persists_result() {
        let outputs = vec![
            StepOutput::new(StepId::CleanText, "cleaned"),
            StepOutput::new(StepId::Summarize, "summary"),
        ];
        let (service, runs) = service(outputs.clone());

        let run = service.submit_run(request("input")).await.unwrap();

        assert_eq!(run.input_text, "input");
        assert_eq!(run.outputs, outputs);
        assert_eq!(runs.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_submit_run_rejects_invalid_request() {
        let (service, runs) = service(vec![]);

        let result = service
            .submit_run(WorkflowRequest::new("input", vec!["summarize".to_string()]))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert_eq!(runs.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sixth_run_evicts_oldest() {
        let (service, runs) = service(vec![StepOutput::new(StepId::CleanText, "out")]);

        for i in 0..6 {
            service.submit_run(request(&format!("input-{}", i))).await.unwrap();
        }

        assert_eq!(runs.count().await.unwrap(), RUN_RETENTION_CAP);

        let remaining = runs.list_recent(10).await.unwrap();
        assert!(remaining.iter().all(|r| r.input_text != "input-0"));
        assert!(remaining.iter().any(|r| r.input_text == "input-5"));
    }

    #[tokio::test]
    async fn test_recent_runs_passes_through() {
        let (service, _) = service(vec![StepOutput::new(StepId::CleanText, "out")]);

        service.submit_run(request("a")).await.unwrap();
        service.submit_run(request("b")).await.unwrap();

        let runs = service.recent_runs(1).await.unwrap();
        assert_eq!(runs.len(), 1);
    }

    #[tokio::test]
    async fn test_store_connected() {
        let (service, _) = service(vec![]);
        assert!(service.store_connected().await);
    }
}
