//! Mock Aggregator Client
//!
//! For testing and demo purposes. Serves canned account lists and holdings
//! payloads shaped like SnapTrade responses.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::AggregatorClient;
use crate::config::UserCredentials;
use crate::error::{HoldingsError, Result};
use crate::model::AccountSummary;

/// Mock aggregator with static data
#[derive(Default)]
pub struct MockAggregatorClient {
    accounts: Vec<AccountSummary>,
    holdings: HashMap<String, Value>,
    fail_listing: bool,
}

impl MockAggregatorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// One brokerage account holding AAPL and VTI, plus an option and two orders
    pub fn demo() -> Self {
        Self::new().with_account(
            AccountSummary::new("3f2a9c1e-demo", "Robinhood Individual").with_institution("Robinhood"),
            demo_holdings(),
        )
    }

    /// Register an account and the payload its holdings call returns
    #[must_use]
    pub fn with_account(mut self, account: AccountSummary, holdings: Value) -> Self {
        self.holdings.insert(account.id.clone(), holdings);
        self.accounts.push(account);
        self
    }

    /// List an account whose holdings call fails
    #[must_use]
    pub fn with_unavailable_account(mut self, account: AccountSummary) -> Self {
        self.accounts.push(account);
        self
    }

    /// Make the account-list call fail
    #[must_use]
    pub const fn failing_account_list(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

#[async_trait]
impl AggregatorClient for MockAggregatorClient {
    async fn list_accounts(&self, _user: &UserCredentials) -> Result<Vec<AccountSummary>> {
        if self.fail_listing {
            return Err(HoldingsError::Aggregator {
                status: 503,
                message: "mock account list unavailable".into(),
            });
        }
        Ok(self.accounts.clone())
    }

    async fn get_holdings(&self, _user: &UserCredentials, account_id: &str) -> Result<Value> {
        self.holdings.get(account_id).cloned().ok_or_else(|| HoldingsError::Aggregator {
            status: 404,
            message: format!("no holdings for account {account_id}"),
        })
    }

    fn name(&self) -> &str {
        "MockAggregator"
    }
}

fn demo_holdings() -> Value {
    json!({
        "account": {
            "id": "3f2a9c1e-demo",
            "name": "Robinhood Individual",
            "number": "****1234",
            "institution_name": "Robinhood",
            "balance": { "total": { "amount": 8245.12, "currency": "USD" } }
        },
        "balances": [
            { "currency": { "code": "USD" }, "cash": 1203.45, "buying_power": 1203.45 }
        ],
        "total_value": { "value": 8245.12, "currency": "USD" },
        "positions": [
            {
                "symbol": {
                    "description": "Apple Inc.",
                    "symbol": {
                        "symbol": "AAPL",
                        "exchange": { "code": "NASDAQ" },
                        "type": { "description": "Common Stock" },
                        "currency": { "code": "USD" }
                    }
                },
                "units": 12,
                "price": 227.52,
                "average_purchase_price": 181.10,
                "open_pnl": 557.04
            },
            {
                "symbol": {
                    "description": "Vanguard Total Stock Market ETF",
                    "symbol": {
                        "symbol": "VTI",
                        "exchange": { "code": "ARCX" },
                        "type": { "description": "ETF" },
                        "currency": { "code": "USD" }
                    }
                },
                "units": 15.5,
                "fractional_units": 0.5,
                "price": 278.14,
                "average_purchase_price": 284.70,
                "open_pnl": -101.68
            }
        ],
        "option_positions": [
            {
                "symbol": {
                    "option_symbol": {
                        "ticker": "AAPL  251219C00250000",
                        "option_type": "CALL",
                        "strike_price": 250,
                        "expiration_date": "2025-12-19",
                        "underlying_symbol": { "symbol": "AAPL" }
                    }
                },
                "units": 1,
                "price": 4.35,
                "average_purchase_price": 3.90,
                "currency": { "code": "USD" }
            }
        ],
        "orders": [
            {
                "brokerage_order_id": "RH-1001",
                "status": "EXECUTED",
                "universal_symbol": { "symbol": "AAPL" },
                "action": "BUY",
                "total_quantity": "2",
                "filled_quantity": "2",
                "execution_price": 221.30,
                "order_type": "Market",
                "time_in_force": "Day",
                "time_placed": "2025-02-03T15:02:11Z",
                "time_executed": "2025-02-03T15:02:12Z",
                "time_updated": "2025-02-03T15:02:12Z"
            },
            {
                "brokerage_order_id": "RH-1002",
                "status": "CANCELED",
                "action": "BUY_OPEN",
                "total_quantity": "1",
                "order_type": "Limit",
                "limit_price": 3.50,
                "time_placed": "2025-02-10T14:45:00Z",
                "option_symbol": {
                    "ticker": "AAPL  251219C00250000",
                    "option_type": "CALL",
                    "strike_price": 250,
                    "expiration_date": "2025-12-19"
                }
            }
        ]
    })
}
