//! Workflow run and history endpoints

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{WorkflowRequest, WorkflowRun, RUN_RETENTION_CAP};

/// Response from a workflow run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunWorkflowResponse {
    pub success: bool,
    pub workflow_run: WorkflowRun,
}

/// Response for the history listing
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub runs: Vec<WorkflowRun>,
}

/// POST /workflow/run
///
/// A run with a failed step is still a 200: the failure is recorded in that
/// step's output text and later steps are absent. Only malformed requests
/// and infrastructure failures produce error statuses.
pub async fn run_workflow(
    State(state): State<AppState>,
    Json(request): Json<WorkflowRequest>,
) -> Result<Json<RunWorkflowResponse>, ApiError> {
    debug!(steps = ?request.steps, "Workflow run requested");

    let workflow_run = state
        .workflow_service
        .submit_run(request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RunWorkflowResponse {
        success: true,
        workflow_run,
    }))
}

/// GET /workflow/history
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let runs = state
        .workflow_service
        .recent_runs(RUN_RETENTION_CAP)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(HistoryResponse {
        success: true,
        runs,
    }))
}
