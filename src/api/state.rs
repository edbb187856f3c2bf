//! Shared application state for handlers

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainError, LlmProvider, WorkflowRequest, WorkflowRun};

/// The workflow operations the HTTP layer depends on
///
/// A trait so handler-level tests can substitute a stub without wiring a
/// provider or a store.
#[async_trait]
pub trait WorkflowServiceTrait: Send + Sync + Debug {
    /// Execute a workflow and persist the (possibly partial) result
    async fn submit_run(&self, request: WorkflowRequest) -> Result<WorkflowRun, DomainError>;

    /// Most recent runs, newest first
    async fn recent_runs(&self, limit: usize) -> Result<Vec<WorkflowRun>, DomainError>;

    /// Whether the backing store answers a ping
    async fn store_connected(&self) -> bool;
}

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub workflow_service: Arc<dyn WorkflowServiceTrait>,
    pub llm_provider: Arc<dyn LlmProvider>,
}

impl AppState {
    pub fn new(
        workflow_service: Arc<dyn WorkflowServiceTrait>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            workflow_service,
            llm_provider,
        }
    }
}
