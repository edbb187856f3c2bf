//! Health endpoint reporting collaborator availability

use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::Json;

/// Store connectivity as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Connected,
    Disconnected,
}

/// Provider readiness as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmStatus {
    Configured,
    NotConfigured,
}

/// Health response with component status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub database: StoreStatus,
    pub llm: LlmStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_error: Option<String>,
}

/// GET /health
///
/// The provider check is a credential probe, not a live call; the store
/// check is a ping.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.llm_provider.configuration_status();
    let database = if state.workflow_service.store_connected().await {
        StoreStatus::Connected
    } else {
        StoreStatus::Disconnected
    };

    Json(HealthResponse {
        status: "ok",
        backend: "running",
        database,
        llm: if provider.configured {
            LlmStatus::Configured
        } else {
            LlmStatus::NotConfigured
        },
        llm_error: provider.error,
    })
}
