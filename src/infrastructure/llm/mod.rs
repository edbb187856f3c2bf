//! LLM provider implementations

mod completion;
mod http_client;
mod openai;
mod retry;

pub use completion::LlmCompletionProvider;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiProvider;
pub use retry::RetryPolicy;
