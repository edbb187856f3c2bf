//! Domain layer - Core business logic and entities

pub mod error;
pub mod llm;
pub mod step;
pub mod workflow;

pub use error::DomainError;
pub use llm::{
    CompletionProvider, FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse,
    Message, MessageRole, ProviderStatus, Usage,
};
pub use step::{PromptTemplate, RenderedPrompt, StepId};

#[cfg(test)]
pub use llm::MockLlmProvider;
pub use workflow::{
    RunOutcome, RunRepository, StepOutput, WorkflowEngine, WorkflowError, WorkflowRequest,
    WorkflowRun, MAX_STEPS, MIN_STEPS, RUN_RETENTION_CAP,
};
