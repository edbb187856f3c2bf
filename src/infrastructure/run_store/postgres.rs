//! PostgreSQL run store with connection pooling
//!
//! Runs live in a dedicated `workflow_runs` table with the step and output
//! sequences stored as JSONB. Retention eviction is a single conditional
//! DELETE keeping the newest rows, so concurrent submissions cannot leave
//! the table above the cap.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use uuid::Uuid;

use crate::domain::{DomainError, RunRepository, StepId, StepOutput, WorkflowRun};

/// PostgreSQL run store configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// PostgreSQL-backed run repository
pub struct PostgresRunRepository {
    pool: PgPool,
}

impl Debug for PostgresRunRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresRunRepository").finish()
    }
}

impl PostgresRunRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with pooling and make sure the table exists
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Create the runs table if it is missing
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workflow_runs (
                id UUID PRIMARY KEY,
                input_text TEXT NOT NULL,
                steps JSONB NOT NULL,
                outputs JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    fn run_from_row(row: &sqlx::postgres::PgRow) -> Result<WorkflowRun, DomainError> {
        let id: Uuid = row.get("id");
        let input_text: String = row.get("input_text");
        let created_at: DateTime<Utc> = row.get("created_at");

        let steps: Vec<StepId> = serde_json::from_value(row.get("steps"))
            .map_err(|e| DomainError::storage(format!("Failed to deserialize steps: {}", e)))?;
        let outputs: Vec<StepOutput> = serde_json::from_value(row.get("outputs"))
            .map_err(|e| DomainError::storage(format!("Failed to deserialize outputs: {}", e)))?;

        Ok(WorkflowRun {
            id,
            input_text,
            steps,
            outputs,
            created_at,
        })
    }
}

#[async_trait]
impl RunRepository for PostgresRunRepository {
    async fn insert(&self, run: WorkflowRun) -> Result<WorkflowRun, DomainError> {
        let steps = serde_json::to_value(&run.steps)
            .map_err(|e| DomainError::storage(format!("Failed to serialize steps: {}", e)))?;
        let outputs = serde_json::to_value(&run.outputs)
            .map_err(|e| DomainError::storage(format!("Failed to serialize outputs: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO workflow_runs (id, input_text, steps, outputs, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(run.id)
        .bind(&run.input_text)
        .bind(&steps)
        .bind(&outputs)
        .bind(run.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert run: {}", e)))?;

        Ok(run)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<WorkflowRun>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, input_text, steps, outputs, created_at
            FROM workflow_runs
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list runs: {}", e)))?;

        rows.iter().map(Self::run_from_row).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM workflow_runs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count runs: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    async fn evict_oldest_beyond(&self, cap: usize) -> Result<usize, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM workflow_runs
            WHERE id NOT IN (
                SELECT id FROM workflow_runs
                ORDER BY created_at DESC
                LIMIT $1
            )
            "#,
        )
        .bind(cap as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to evict runs: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://localhost/textflow")
            .with_max_connections(20)
            .with_connect_timeout(60);

        assert_eq!(config.url, "postgres://localhost/textflow");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connect_timeout_secs, 60);
    }

    #[test]
    fn test_postgres_config_defaults() {
        let config = PostgresConfig::new("postgres://localhost/textflow");

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout_secs, 30);
    }
}
