use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unknown step: {step}")]
    UnknownStep { step: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Empty response from LLM")]
    EmptyResponse,

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_step(step: impl Into<String>) -> Self {
        Self::UnknownStep { step: step.into() }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("steps must contain between 2 and 4 items");
        assert_eq!(
            error.to_string(),
            "Validation error: steps must contain between 2 and 4 items"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "HTTP 500: upstream failure");
        assert_eq!(
            error.to_string(),
            "Provider error: openai - HTTP 500: upstream failure"
        );
    }

    #[test]
    fn test_empty_response_error() {
        assert_eq!(
            DomainError::EmptyResponse.to_string(),
            "Empty response from LLM"
        );
    }
}
