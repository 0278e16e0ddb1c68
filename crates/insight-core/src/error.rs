//! Error Types

use thiserror::Error;

/// Result type alias for insight operations
pub type Result<T> = std::result::Result<T, InsightError>;

/// Errors raised while talking to a language model
#[derive(Error, Debug)]
pub enum InsightError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The model answered with nothing usable
    #[error("Empty response from model {0}")]
    EmptyResponse(String),
}

impl InsightError {
    /// Convert to a message fit for the operator's terminal
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Is `ollama serve` running?".into()
            }
            Self::EmptyResponse(model) => format!("Model '{model}' returned no insights."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_mentions_ollama() {
        let err = InsightError::ProviderUnavailable("connection refused".into());
        assert!(err.user_message().contains("ollama serve"));
    }

    #[test]
    fn test_user_message_names_model() {
        let err = InsightError::EmptyResponse("deepseek-r1".into());
        assert!(err.user_message().contains("deepseek-r1"));
    }
}
