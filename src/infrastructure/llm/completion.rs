//! Step completion adapter over an LLM provider
//!
//! Bridges the engine's one-shot completion contract onto the chat API:
//! instruction as the system turn, user text as the user turn, temperature
//! pinned to zero so step outputs stay reproducible.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    CompletionProvider, DomainError, LlmProvider, LlmRequest, RenderedPrompt,
};

/// Substrings that mark a provider failure as throttling
///
/// The transports involved surface rate limiting in several shapes (a 429
/// status line, an error message, a gRPC-style code), so detection is
/// pattern-based and lives only here.
const RATE_LIMIT_MARKERS: [&str; 4] = [
    "429",
    "too many requests",
    "rate limit",
    "resource_exhausted",
];

/// Reclassify a provider failure, tagging throttling distinctly
fn classify_provider_error(error: DomainError) -> DomainError {
    match error {
        DomainError::Provider { provider, message } => {
            let lowered = message.to_lowercase();
            if RATE_LIMIT_MARKERS.iter().any(|m| lowered.contains(m)) {
                DomainError::rate_limited(message)
            } else {
                DomainError::Provider { provider, message }
            }
        }
        other => other,
    }
}

/// [`CompletionProvider`] backed by an [`LlmProvider`] and a fixed model
#[derive(Debug)]
pub struct LlmCompletionProvider {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmCompletionProvider {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for LlmCompletionProvider {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .system(&prompt.instruction)
            .user(&prompt.user)
            .temperature(0.0)
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(classify_provider_error)?;

        let output = response.content().trim();
        if output.is_empty() {
            return Err(DomainError::EmptyResponse);
        }

        Ok(output.to_string())
    }
}
