//! Account Registry
//!
//! Maps account display names to aggregator account ids and holds the latest
//! `FullSnapshot` per account name. Process-local; rebuilt every run.

use std::collections::HashMap;

use crate::format::{render_prompt, render_report};
use crate::model::{AccountSummary, FullSnapshot, SmallSnapshot};

#[derive(Clone, Debug, Default)]
pub struct AccountRegistry {
    account_ids: HashMap<String, String>,
    snapshots: HashMap<String, FullSnapshot>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge accounts into the name → id map; a repeated name keeps the last id.
    /// Returns how many entries were applied.
    pub fn register_accounts<I>(&mut self, accounts: I) -> usize
    where
        I: IntoIterator<Item = AccountSummary>,
    {
        let mut applied = 0;
        for account in accounts {
            if let Some(previous) = self.account_ids.insert(account.name.clone(), account.id.clone()) {
                if previous != account.id {
                    tracing::debug!(account = %account.name, old_id = %previous, new_id = %account.id, "Account id replaced");
                }
            }
            applied += 1;
        }
        applied
    }

    #[must_use]
    pub fn account_id(&self, name: &str) -> Option<&str> {
        self.account_ids.get(name).map(String::as_str)
    }

    /// Registered account names, sorted
    #[must_use]
    pub fn account_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.account_ids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Store the latest snapshot for `name`, returning the one it replaced
    pub fn store_snapshot(&mut self, name: impl Into<String>, snapshot: FullSnapshot) -> Option<FullSnapshot> {
        self.snapshots.insert(name.into(), snapshot)
    }

    #[must_use]
    pub fn get_snapshot(&self, name: &str) -> Option<&FullSnapshot> {
        self.snapshots.get(name)
    }

    #[must_use]
    pub fn small_snapshot(&self, name: &str) -> Option<SmallSnapshot> {
        self.get_snapshot(name).map(SmallSnapshot::from)
    }

    #[must_use]
    pub fn report(&self, name: &str) -> String {
        render_report(name, self.small_snapshot(name).as_ref())
    }

    #[must_use]
    pub fn prompt(&self, name: &str) -> String {
        render_prompt(name, self.small_snapshot(name).as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.account_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.account_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn snapshot_with_cash(cash: f64) -> FullSnapshot {
        FullSnapshot::from_holdings(&json!({
            "account": { "name": "Robinhood Individual" },
            "balances": [{ "cash": cash }]
        }))
        .unwrap()
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut registry = AccountRegistry::new();
        let applied = registry.register_accounts(vec![
            AccountSummary::new("id-1", "Robinhood Individual"),
            AccountSummary::new("id-2", "Fidelity Roth IRA"),
            AccountSummary::new("id-3", "Robinhood Individual"),
        ]);

        assert_eq!(applied, 3);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.account_id("Robinhood Individual"), Some("id-3"));
        assert_eq!(registry.account_names(), vec!["Fidelity Roth IRA", "Robinhood Individual"]);
    }

    #[test]
    fn test_register_merges_across_calls() {
        let mut registry = AccountRegistry::new();
        registry.register_accounts(vec![AccountSummary::new("id-1", "Robinhood Individual")]);
        registry.register_accounts(vec![AccountSummary::new("id-2", "Fidelity Roth IRA")]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_store_overwrites() {
        let mut registry = AccountRegistry::new();
        let mut older = snapshot_with_cash(100.0);
        older.metadata.pulled_at = Utc::now() - Duration::hours(1);

        assert!(registry.store_snapshot("Robinhood Individual", older.clone()).is_none());
        let replaced = registry.store_snapshot("Robinhood Individual", snapshot_with_cash(250.0));

        assert_eq!(replaced, Some(older));
        let current = registry.get_snapshot("Robinhood Individual").unwrap();
        assert_eq!(current.balances.cash_available, Some(dec!(250)));
    }

    #[test]
    fn test_unknown_account_is_absent() {
        let registry = AccountRegistry::new();
        assert!(registry.account_id("Nope").is_none());
        assert!(registry.get_snapshot("Nope").is_none());
        assert!(registry.small_snapshot("Nope").is_none());
        assert_eq!(registry.report("Nope"), "No holdings data available for account: Nope");
        assert_eq!(registry.prompt("Nope"), "No holdings data available for account: Nope");
    }

    #[test]
    fn test_report_uses_stored_snapshot() {
        let mut registry = AccountRegistry::new();
        registry.store_snapshot("Robinhood Individual", snapshot_with_cash(500.0));
        assert!(registry.report("Robinhood Individual").contains("Cash Available: $500.00"));
        assert!(registry.prompt("Robinhood Individual").contains("  Cash Available: $500.00"));
    }
}
