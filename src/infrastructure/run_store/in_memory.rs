//! In-memory run store
//!
//! Useful for development and tests. Data is lost when the process
//! terminates. Eviction runs under the same write lock as the scan that
//! decides it, so the cap cannot be overshot within one process.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, RunRepository, WorkflowRun};

#[derive(Debug, Default)]
pub struct InMemoryRunRepository {
    runs: RwLock<Vec<WorkflowRun>>,
}

impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunRepository for InMemoryRunRepository {
    async fn insert(&self, run: WorkflowRun) -> Result<WorkflowRun, DomainError> {
        let mut runs = self.runs.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        runs.push(run.clone());
        Ok(run)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<WorkflowRun>, DomainError> {
        let runs = self.runs.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut recent: Vec<WorkflowRun> = runs.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let runs = self.runs.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(runs.len())
    }

    async fn evict_oldest_beyond(&self, cap: usize) -> Result<usize, DomainError> {
        let mut runs = self.runs.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if runs.len() <= cap {
            return Ok(0);
        }

        let excess = runs.len() - cap;
        runs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        runs.drain(0..excess);
        Ok(excess)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
