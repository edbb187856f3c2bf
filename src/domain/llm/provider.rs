use std::fmt::Debug;

use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::step::RenderedPrompt;
use crate::domain::DomainError;

/// Result of the cheap provider readiness probe
///
/// Reports whether the provider has the credentials it needs; it never makes
/// a live call.
#[derive(Debug, Clone)]
pub struct ProviderStatus {
    pub configured: bool,
    pub error: Option<String>,
}

impl ProviderStatus {
    pub fn configured() -> Self {
        Self {
            configured: true,
            error: None,
        }
    }

    pub fn not_configured(error: impl Into<String>) -> Self {
        Self {
            configured: false,
            error: Some(error.into()),
        }
    }
}

/// Trait for LLM providers (OpenAI-compatible chat endpoints)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Report whether required credentials are present
    fn configuration_status(&self) -> ProviderStatus;
}

/// A single step-level completion against the external provider
///
/// Implementations transmit both the instruction and the user text, return
/// the trimmed generated text, and classify failures (rate limiting, empty
/// output, everything else) into the corresponding [`DomainError`] variants.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, DomainError>;
}
