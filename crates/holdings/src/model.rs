//! Snapshot Models
//!
//! Typed views of one brokerage account's holdings. Every value that comes
//! from the aggregator is an `Option`: a missing key in the source payload is
//! `None` here and stays `None` all the way to the rendered text.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A brokerage account as listed by the aggregator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Aggregator account identifier
    pub id: String,

    /// Display name (e.g., "Robinhood Individual")
    pub name: String,

    /// Brokerage institution, when reported
    pub institution_name: Option<String>,
}

impl AccountSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            institution_name: None,
        }
    }

    #[must_use]
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution_name = Some(institution.into());
        self
    }
}

/// Complete, flattened holdings pull for one account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FullSnapshot {
    pub metadata: SnapshotMetadata,
    pub balances: Balances,
    pub positions: Vec<PositionRecord>,
    pub option_positions: Vec<OptionPositionRecord>,
    pub orders: Vec<OrderRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub account_id: Option<String>,
    pub account_name: Option<String>,
    pub institution_name: Option<String>,

    /// When the adapter ran
    pub pulled_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub total_balance: Option<Decimal>,
    pub total_balance_currency: Option<String>,
    pub cash_available: Option<Decimal>,
    pub buying_power: Option<Decimal>,
    pub total_portfolio_value: Option<Decimal>,
    pub total_portfolio_currency: Option<String>,
}

/// An equity/ETF/crypto position
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub units: Option<Decimal>,
    pub fractional_units: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub average_purchase_price: Option<Decimal>,
    pub open_pnl: Option<Decimal>,
    pub exchange: Option<String>,
    pub asset_type: Option<String>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionPositionRecord {
    pub underlying_symbol: Option<String>,
    pub option_ticker: Option<String>,
    pub option_type: Option<String>,
    pub strike_price: Option<Decimal>,
    pub expiration_date: Option<String>,
    pub units: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub average_purchase_price: Option<Decimal>,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub brokerage_order_id: Option<String>,
    pub symbol: Option<String>,
    pub action: Option<String>,
    pub total_quantity: Option<Decimal>,
    pub filled_quantity: Option<Decimal>,
    pub execution_price: Option<Decimal>,
    pub order_type: Option<String>,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub status: Option<String>,
    pub time_placed: Option<String>,
    pub time_executed: Option<String>,
    pub time_updated: Option<String>,
    pub expiry_date: Option<String>,

    /// Only present for option orders
    pub option_symbol: Option<OrderOptionSymbol>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderOptionSymbol {
    pub ticker: Option<String>,
    pub option_type: Option<String>,
    pub strike_price: Option<Decimal>,
    pub expiration_date: Option<String>,
}

/// Summarization subset of a `FullSnapshot`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmallSnapshot {
    pub snapshot_date: DateTime<Utc>,
    pub account: Option<String>,
    pub balances: SmallBalances,
    pub positions: Vec<SmallPosition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallBalances {
    pub total_balance: Option<Decimal>,
    pub cash_available: Option<Decimal>,
    pub buying_power: Option<Decimal>,
    pub total_portfolio_value: Option<Decimal>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SmallPosition {
    pub symbol: Option<String>,
    pub units: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub open_pnl: Option<Decimal>,
}

impl SmallPosition {
    /// Units × current price, when both are known and the product fits in a `Decimal`
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        self.units?.checked_mul(self.current_price?)
    }
}

/// Aggregates over a snapshot's positions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortfolioTotals {
    /// Σ units × price (missing values count as zero); `None` on overflow
    pub position_value: Option<Decimal>,

    /// Σ open P&L (missing values count as zero); `None` on overflow
    pub total_pnl: Option<Decimal>,

    /// total P&L / position value × 100, only when position value > 0
    pub pnl_percent: Option<Decimal>,
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, Decimal::checked_add)
}

impl SmallSnapshot {
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        let position_value = checked_sum(
            self.positions.iter().map(|p| p.value().unwrap_or(Decimal::ZERO)),
        );
        let total_pnl = checked_sum(
            self.positions.iter().map(|p| p.open_pnl.unwrap_or(Decimal::ZERO)),
        );

        // Denominator is the sum of position values, not the reported
        // portfolio value from the balances block.
        let pnl_percent = position_value
            .zip(total_pnl)
            .filter(|(value, _)| *value > Decimal::ZERO)
            .and_then(|(value, pnl)| pnl.checked_div(value))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));

        PortfolioTotals {
            position_value,
            total_pnl,
            pnl_percent,
        }
    }
}
