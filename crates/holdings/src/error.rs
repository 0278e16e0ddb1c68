//! Error Types for Holdings

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HoldingsError>;

#[derive(Error, Debug)]
pub enum HoldingsError {
    #[error("Invalid holdings payload: {0}")]
    InvalidPayload(String),

    #[error("Aggregator returned {status}: {message}")]
    Aggregator {
        status: u16,
        message: String,
    },

    #[error("Request signing failed: {0}")]
    Signature(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
