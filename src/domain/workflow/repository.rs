//! Run repository contract

use std::fmt::Debug;

use async_trait::async_trait;

use super::WorkflowRun;
use crate::domain::DomainError;

/// Maximum number of historical runs retained; oldest evicted first
pub const RUN_RETENTION_CAP: usize = 5;

/// Append-only store of completed workflow runs
#[async_trait]
pub trait RunRepository: Send + Sync + Debug {
    /// Persist a completed (possibly partial) run
    async fn insert(&self, run: WorkflowRun) -> Result<WorkflowRun, DomainError>;

    /// The most recent runs, newest first
    async fn list_recent(&self, limit: usize) -> Result<Vec<WorkflowRun>, DomainError>;

    /// Number of stored runs
    async fn count(&self) -> Result<usize, DomainError>;

    /// Delete the oldest runs beyond `cap`, returning how many were evicted
    async fn evict_oldest_beyond(&self, cap: usize) -> Result<usize, DomainError>;

    /// Cheap connectivity probe for the health endpoint
    async fn ping(&self) -> Result<(), DomainError>;
}
