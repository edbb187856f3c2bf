//! Textflow API
//!
//! A small text-processing pipeline service: clients submit input text plus
//! an ordered list of 2-4 named transformation steps, each step is delegated
//! to an LLM provider with its output feeding the next step, and completed
//! runs are kept in a bounded recent-history store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{CompletionProvider, LlmProvider, RunRepository, WorkflowEngine};
use infrastructure::llm::{HttpClient, LlmCompletionProvider, OpenAiProvider, RetryPolicy};
use infrastructure::run_store::{InMemoryRunRepository, PostgresConfig, PostgresRunRepository};
use infrastructure::services::WorkflowService;
use infrastructure::workflow::WorkflowEngineImpl;

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let llm_provider = create_llm_provider(config);

    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| config.provider.model.clone());
    info!("Using model: {}", model);

    let completion: Arc<dyn CompletionProvider> =
        Arc::new(LlmCompletionProvider::new(llm_provider.clone(), model));
    let engine: Arc<dyn WorkflowEngine> =
        Arc::new(WorkflowEngineImpl::with_retry_policy(completion, RetryPolicy::default()));

    let run_repository = create_run_repository(config).await?;
    let workflow_service = Arc::new(WorkflowService::new(engine, run_repository));

    Ok(AppState::new(workflow_service, llm_provider))
}

fn create_llm_provider(config: &AppConfig) -> Arc<dyn LlmProvider> {
    // An absent key still yields a provider; the health endpoint reports it
    // as not configured and run attempts fail per step.
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let base_url = std::env::var("OPENAI_BASE_URL")
        .ok()
        .or_else(|| config.provider.base_url.clone());

    match base_url {
        Some(url) => {
            info!("Using OpenAI provider with custom base URL: {}", url);
            Arc::new(OpenAiProvider::with_base_url(HttpClient::new(), api_key, url))
        }
        None => {
            info!("Using OpenAI provider with default base URL");
            Arc::new(OpenAiProvider::new(HttpClient::new(), api_key))
        }
    }
}

async fn create_run_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn RunRepository>> {
    match config.storage.backend.as_str() {
        "postgres" => {
            let database_url = std::env::var("DATABASE_URL").map_err(|_| {
                anyhow::anyhow!("DATABASE_URL environment variable is required for postgres storage")
            })?;

            info!("Connecting to PostgreSQL...");
            let repository =
                PostgresRunRepository::connect(&PostgresConfig::new(database_url)).await?;
            info!("PostgreSQL connection established");

            Ok(Arc::new(repository))
        }
        "memory" => {
            info!("Using in-memory run store");
            Ok(Arc::new(InMemoryRunRepository::new()))
        }
        other => Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
    }
}
