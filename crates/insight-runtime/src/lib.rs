//! # insight-runtime
//!
//! Language-model providers for portfolio insights.
//!
//! ## Providers
//!
//! - **Ollama** (default): local inference, `deepseek-r1` unless
//!   `INSIGHTS_MODEL` says otherwise
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insight_runtime::OllamaProvider;
//!
//! let provider = OllamaProvider::from_env();
//! let insights = holdings::insights::generate_insights(&provider, &prompt, &options).await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use insight_core::{GenerationOptions, InsightError, LlmProvider, Message, Result, Role};
