//! # holdings
//!
//! Brokerage holdings snapshots pulled through an aggregator (SnapTrade),
//! reduced to the few fields worth reading and rendered as text.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Aggregator  │──▶│ FullSnapshot │──▶│SmallSnapshot │──▶│ report text  │
//! │  raw JSON    │   │  (adapter)   │   │  (reducer)   │   │ prompt text  │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                           │                                     │
//!                    AccountRegistry                       LLM insights
//!                  (name → id, snapshot)                   (insights.rs)
//! ```
//!
//! Every field read from the aggregator is optional. Missing data flows
//! through as `None` and renders as `N/A`; it never aborts a pull.

pub mod adapter;
pub mod aggregator;
pub mod config;
pub mod error;
pub mod format;
pub mod insights;
pub mod model;
pub mod reducer;
pub mod registry;
pub mod user;

pub use aggregator::{AggregatorClient, MockAggregatorClient, SnapTradeClient};
pub use config::{SnapTradeConfig, UserCredentials};
pub use error::{HoldingsError, Result};
pub use format::{render_prompt, render_report};
pub use insights::generate_insights;
pub use model::{AccountSummary, FullSnapshot, PortfolioTotals, SmallPosition, SmallSnapshot};
pub use reducer::reduce;
pub use registry::AccountRegistry;
pub use user::BrokerageUser;
