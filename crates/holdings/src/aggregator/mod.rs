//! Aggregator Integration
//!
//! Abstractions and implementations for brokerage-aggregation APIs.

mod mock;
mod snaptrade;

pub use mock::MockAggregatorClient;
pub use snaptrade::SnapTradeClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::UserCredentials;
use crate::error::Result;
use crate::model::AccountSummary;

/// Aggregator client trait (Strategy pattern)
///
/// Implement this for each aggregator. Both calls are single requests:
/// no retry, failures come back as `Err`.
#[async_trait]
pub trait AggregatorClient: Send + Sync {
    /// List the user's connected brokerage accounts
    async fn list_accounts(&self, user: &UserCredentials) -> Result<Vec<AccountSummary>>;

    /// Raw holdings payload for one account
    async fn get_holdings(&self, user: &UserCredentials, account_id: &str) -> Result<Value>;

    /// Aggregator name
    fn name(&self) -> &str;
}

/// Turn a raw account list into summaries, skipping entries without a name or id
pub(crate) fn parse_accounts(raw: &Value) -> Vec<AccountSummary> {
    let Some(entries) = raw.as_array() else {
        tracing::warn!("Account list response is not an array");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id").and_then(Value::as_str);
            let name = entry.get("name").and_then(Value::as_str);
            match (id, name) {
                (Some(id), Some(name)) => {
                    let mut account = AccountSummary::new(id, name);
                    account.institution_name = entry
                        .get("institution_name")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    Some(account)
                }
                _ => {
                    tracing::warn!(id = ?id, "Skipping account without id or name");
                    None
                }
            }
        })
        .collect()
}
