//! Snapshot Reducer
//!
//! Keeps only what summarization needs: balances and the
//! symbol/units/price/P&L of each position. Option positions and orders
//! are dropped.

use crate::model::{FullSnapshot, SmallBalances, SmallPosition, SmallSnapshot};

impl From<&FullSnapshot> for SmallSnapshot {
    fn from(full: &FullSnapshot) -> Self {
        Self {
            snapshot_date: full.metadata.pulled_at,
            account: full.metadata.account_name.clone(),
            balances: SmallBalances {
                total_balance: full.balances.total_balance,
                cash_available: full.balances.cash_available,
                buying_power: full.balances.buying_power,
                total_portfolio_value: full.balances.total_portfolio_value,
            },
            positions: full.positions.iter()
                .map(|p| SmallPosition {
                    symbol: p.symbol.clone(),
                    units: p.units,
                    current_price: p.current_price,
                    open_pnl: p.open_pnl,
                })
                .collect(),
        }
    }
}

/// Reduce a stored snapshot; `None` in means "no data" out
#[must_use]
pub fn reduce(full: Option<&FullSnapshot>) -> Option<SmallSnapshot> {
    full.map(SmallSnapshot::from)
}
