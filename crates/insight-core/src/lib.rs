//! # insight-core
//!
//! Provider-agnostic LLM abstraction shared by the portfolio insight crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    portfolio-insights                        │
//! │  ┌──────────────┐   ┌─────────────┐   ┌──────────────────┐   │
//! │  │   holdings   │──▶│ LlmProvider │──▶│ insight-runtime  │   │
//! │  │  (snapshots) │   │  (Strategy) │   │    (Ollama)      │   │
//! │  └──────────────┘   └─────────────┘   └──────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait keeps the snapshot pipeline independent of the
//! model backend. `Secret` wraps credentials so they never reach a log line.

pub mod error;
pub mod message;
pub mod provider;
pub mod secret;

pub use error::{InsightError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
pub use secret::Secret;
