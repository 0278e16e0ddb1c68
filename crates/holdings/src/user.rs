//! Brokerage User Session
//!
//! Pairs one user's aggregator credentials with their `AccountRegistry`.
//! The aggregator client is passed in per call. Pull operations report
//! success as `bool` and log the failure, so a caller can keep going through
//! a batch of accounts after one of them fails.

use crate::aggregator::AggregatorClient;
use crate::config::UserCredentials;
use crate::model::{FullSnapshot, SmallSnapshot};
use crate::registry::AccountRegistry;

pub struct BrokerageUser {
    credentials: UserCredentials,
    registry: AccountRegistry,
}

impl BrokerageUser {
    pub fn new(credentials: UserCredentials) -> Self {
        Self {
            credentials,
            registry: AccountRegistry::new(),
        }
    }

    #[must_use]
    pub const fn credentials(&self) -> &UserCredentials {
        &self.credentials
    }

    #[must_use]
    pub const fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    /// Fetch connected accounts and merge them into the registry
    pub async fn pull_connected_accounts(&mut self, client: &dyn AggregatorClient) -> bool {
        match client.list_accounts(&self.credentials).await {
            Ok(accounts) => {
                let registered = self.registry.register_accounts(accounts);
                tracing::info!(aggregator = client.name(), registered, "Pulled connected brokerage accounts");
                true
            }
            Err(e) => {
                tracing::error!(aggregator = client.name(), error = %e, "Error pulling connected brokerage accounts");
                false
            }
        }
    }

    /// Fetch holdings for a registered account and store a fresh snapshot
    pub async fn pull_account_holdings(&mut self, client: &dyn AggregatorClient, account_name: &str) -> bool {
        let Some(account_id) = self.registry.account_id(account_name).map(str::to_string) else {
            tracing::error!(account = account_name, "Error pulling holdings: account not registered");
            return false;
        };

        let raw = match client.get_holdings(&self.credentials, &account_id).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(account = account_name, error = %e, "Error pulling holdings");
                return false;
            }
        };

        match FullSnapshot::from_holdings(&raw) {
            Ok(snapshot) => {
                tracing::info!(
                    account = account_name,
                    positions = snapshot.positions.len(),
                    option_positions = snapshot.option_positions.len(),
                    orders = snapshot.orders.len(),
                    "Stored holdings snapshot"
                );
                self.registry.store_snapshot(account_name, snapshot);
                true
            }
            Err(e) => {
                tracing::error!(account = account_name, error = %e, "Error building holdings snapshot");
                false
            }
        }
    }

    /// Pull holdings for every registered account; one failure does not stop the rest.
    /// Returns `(account name, success)` in name order.
    pub async fn pull_all_holdings(&mut self, client: &dyn AggregatorClient) -> Vec<(String, bool)> {
        let names: Vec<String> = self.registry.account_names().into_iter().map(str::to_string).collect();
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let ok = self.pull_account_holdings(client, &name).await;
            outcomes.push((name, ok));
        }
        outcomes
    }

    #[must_use]
    pub fn small_snapshot(&self, account_name: &str) -> Option<SmallSnapshot> {
        self.registry.small_snapshot(account_name)
    }

    #[must_use]
    pub fn format_portfolio_summary(&self, account_name: &str) -> String {
        self.registry.report(account_name)
    }

    #[must_use]
    pub fn format_prompt(&self, account_name: &str) -> String {
        self.registry.prompt(account_name)
    }
}
