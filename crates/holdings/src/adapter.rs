//! Raw Response Adapter
//!
//! Flattens the aggregator's nested holdings payload into a `FullSnapshot`.
//!
//! All lookups go through [`Field`], a guarded accessor over JSON pointers:
//! a missing key, a `null`, the wrong container type or an out-of-range index
//! at any depth yields `None` for that leaf instead of failing the transform.
//! The only hard failure is a top-level payload that is not a JSON object.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{HoldingsError, Result};
use crate::model::{
    Balances, FullSnapshot, OptionPositionRecord, OrderOptionSymbol, OrderRecord,
    PositionRecord, SnapshotMetadata,
};

/// Guarded accessor over one JSON node
#[derive(Clone, Copy)]
struct Field<'a>(&'a Value);

impl<'a> Field<'a> {
    /// Follow a JSON pointer (e.g. `/account/balance/total/amount`)
    fn at(self, pointer: &str) -> Option<&'a Value> {
        self.0.pointer(pointer).filter(|v| !v.is_null())
    }

    fn text(self, pointer: &str) -> Option<String> {
        match self.at(pointer)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Present but unparseable or out-of-range values are logged and read as `None`
    fn decimal(self, pointer: &str) -> Option<Decimal> {
        let raw = match self.at(pointer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            other => {
                tracing::debug!(field = pointer, value = %other, "Ignoring non-numeric value");
                return None;
            }
        };

        let parsed = parse_decimal(&raw);
        if parsed.is_none() {
            tracing::debug!(field = pointer, value = %raw, "Numeric value not representable as Decimal");
        }
        parsed
    }

    /// Array items under `pointer`; anything that is not an array is empty
    fn items(self, pointer: &str) -> impl Iterator<Item = Field<'a>> {
        self.at(pointer)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Field)
    }
}

/// Parse plain or scientific notation ("1.5e-7") numbers
fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

impl FullSnapshot {
    /// Build a snapshot from a raw holdings payload, stamped with the current time
    pub fn from_holdings(raw: &Value) -> Result<Self> {
        Self::from_holdings_at(raw, Utc::now())
    }

    /// Build a snapshot from a raw holdings payload with an explicit pull time
    pub fn from_holdings_at(raw: &Value, pulled_at: DateTime<Utc>) -> Result<Self> {
        if !raw.is_object() {
            return Err(HoldingsError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(raw)
            )));
        }

        let root = Field(raw);

        Ok(Self {
            metadata: SnapshotMetadata {
                account_id: root.text("/account/id"),
                account_name: root.text("/account/name"),
                institution_name: root.text("/account/institution_name"),
                pulled_at,
            },
            balances: Balances {
                total_balance: root.decimal("/account/balance/total/amount"),
                total_balance_currency: root.text("/account/balance/total/currency"),
                cash_available: root.decimal("/balances/0/cash"),
                buying_power: root.decimal("/balances/0/buying_power"),
                total_portfolio_value: root.decimal("/total_value/value"),
                total_portfolio_currency: root.text("/total_value/currency"),
            },
            positions: root.items("/positions").map(position).collect(),
            option_positions: root.items("/option_positions").map(option_position).collect(),
            orders: root.items("/orders").map(order).collect(),
        })
    }
}

fn position(p: Field<'_>) -> PositionRecord {
    PositionRecord {
        symbol: p.text("/symbol/symbol/symbol"),
        description: p.text("/symbol/description"),
        units: p.decimal("/units"),
        fractional_units: p.decimal("/fractional_units"),
        current_price: p.decimal("/price"),
        average_purchase_price: p.decimal("/average_purchase_price"),
        open_pnl: p.decimal("/open_pnl"),
        exchange: p.text("/symbol/symbol/exchange/code"),
        asset_type: p.text("/symbol/symbol/type/description"),
        currency: p.text("/symbol/symbol/currency/code"),
    }
}

fn option_position(o: Field<'_>) -> OptionPositionRecord {
    OptionPositionRecord {
        underlying_symbol: o.text("/symbol/option_symbol/underlying_symbol/symbol"),
        option_ticker: o.text("/symbol/option_symbol/ticker"),
        option_type: o.text("/symbol/option_symbol/option_type"),
        strike_price: o.decimal("/symbol/option_symbol/strike_price"),
        expiration_date: o.text("/symbol/option_symbol/expiration_date"),
        units: o.decimal("/units"),
        current_price: o.decimal("/price"),
        average_purchase_price: o.decimal("/average_purchase_price"),
        currency: o.text("/currency/code"),
    }
}

fn order(o: Field<'_>) -> OrderRecord {
    let option_symbol = o
        .at("/option_symbol")
        .and_then(Value::as_object)
        .filter(|obj| !obj.is_empty())
        .map(|_| OrderOptionSymbol {
            ticker: o.text("/option_symbol/ticker"),
            option_type: o.text("/option_symbol/option_type"),
            strike_price: o.decimal("/option_symbol/strike_price"),
            expiration_date: o.text("/option_symbol/expiration_date"),
        });

    OrderRecord {
        brokerage_order_id: o.text("/brokerage_order_id"),
        symbol: o.text("/universal_symbol/symbol"),
        action: o.text("/action"),
        total_quantity: o.decimal("/total_quantity"),
        filled_quantity: o.decimal("/filled_quantity"),
        execution_price: o.decimal("/execution_price"),
        order_type: o.text("/order_type"),
        limit_price: o.decimal("/limit_price"),
        stop_price: o.decimal("/stop_price"),
        status: o.text("/status"),
        time_placed: o.text("/time_placed"),
        time_executed: o.text("/time_executed"),
        time_updated: o.text("/time_updated"),
        expiry_date: o.text("/expiry_date"),
        option_symbol,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "account": {
                "id": "acc-123",
                "name": "Robinhood Individual",
                "institution_name": "Robinhood",
                "balance": { "total": { "amount": 1000.0, "currency": "USD" } }
            },
            "balances": [
                { "cash": 500.0, "buying_power": 500.0, "currency": { "code": "USD" } }
            ],
            "total_value": { "value": 1500.0, "currency": "USD" },
            "positions": [{
                "symbol": {
                    "description": "Apple Inc.",
                    "symbol": {
                        "symbol": "AAPL",
                        "exchange": { "code": "NASDAQ" },
                        "type": { "description": "Common Stock" },
                        "currency": { "code": "USD" }
                    }
                },
                "units": 10,
                "fractional_units": "0.5",
                "price": 150.0,
                "average_purchase_price": 147.45,
                "open_pnl": 25.5
            }],
            "option_positions": [{
                "symbol": {
                    "option_symbol": {
                        "ticker": "AAPL  250117C00200000",
                        "option_type": "CALL",
                        "strike_price": 200,
                        "expiration_date": "2025-01-17",
                        "underlying_symbol": { "symbol": "AAPL" }
                    }
                },
                "units": 1,
                "price": 2.15,
                "average_purchase_price": 1.80,
                "currency": { "code": "USD" }
            }],
            "orders": [
                {
                    "brokerage_order_id": "ord-1",
                    "universal_symbol": { "symbol": "AAPL" },
                    "action": "BUY",
                    "total_quantity": "10",
                    "filled_quantity": "10",
                    "execution_price": 147.45,
                    "order_type": "Market",
                    "status": "EXECUTED",
                    "time_placed": "2024-06-01T14:30:00Z"
                },
                {
                    "brokerage_order_id": "ord-2",
                    "action": "BUY_OPEN",
                    "option_symbol": {
                        "ticker": "AAPL  250117C00200000",
                        "option_type": "CALL",
                        "strike_price": 200,
                        "expiration_date": "2025-01-17"
                    }
                }
            ]
        })
    }

    #[test]
    fn test_full_mapping() {
        let snapshot = FullSnapshot::from_holdings(&sample_payload()).unwrap();

        assert_eq!(snapshot.metadata.account_id.as_deref(), Some("acc-123"));
        assert_eq!(snapshot.metadata.account_name.as_deref(), Some("Robinhood Individual"));
        assert_eq!(snapshot.metadata.institution_name.as_deref(), Some("Robinhood"));

        assert_eq!(snapshot.balances.total_balance, Some(dec!(1000)));
        assert_eq!(snapshot.balances.total_balance_currency.as_deref(), Some("USD"));
        assert_eq!(snapshot.balances.cash_available, Some(dec!(500)));
        assert_eq!(snapshot.balances.buying_power, Some(dec!(500)));
        assert_eq!(snapshot.balances.total_portfolio_value, Some(dec!(1500)));

        let aapl = &snapshot.positions[0];
        assert_eq!(aapl.symbol.as_deref(), Some("AAPL"));
        assert_eq!(aapl.description.as_deref(), Some("Apple Inc."));
        assert_eq!(aapl.units, Some(dec!(10)));
        assert_eq!(aapl.fractional_units, Some(dec!(0.5)));
        assert_eq!(aapl.current_price, Some(dec!(150)));
        assert_eq!(aapl.average_purchase_price, Some(dec!(147.45)));
        assert_eq!(aapl.open_pnl, Some(dec!(25.5)));
        assert_eq!(aapl.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(aapl.asset_type.as_deref(), Some("Common Stock"));
        assert_eq!(aapl.currency.as_deref(), Some("USD"));

        let call = &snapshot.option_positions[0];
        assert_eq!(call.underlying_symbol.as_deref(), Some("AAPL"));
        assert_eq!(call.option_type.as_deref(), Some("CALL"));
        assert_eq!(call.strike_price, Some(dec!(200)));
        assert_eq!(call.currency.as_deref(), Some("USD"));

        assert_eq!(snapshot.orders.len(), 2);
        assert_eq!(snapshot.orders[0].symbol.as_deref(), Some("AAPL"));
        assert_eq!(snapshot.orders[0].total_quantity, Some(dec!(10)));
        assert!(snapshot.orders[0].option_symbol.is_none());
        let option = snapshot.orders[1].option_symbol.as_ref().unwrap();
        assert_eq!(option.ticker.as_deref(), Some("AAPL  250117C00200000"));
        assert_eq!(option.strike_price, Some(dec!(200)));
    }

    #[test]
    fn test_empty_object_is_structurally_complete() {
        let snapshot = FullSnapshot::from_holdings(&json!({})).unwrap();

        assert!(snapshot.metadata.account_id.is_none());
        assert_eq!(snapshot.balances, Balances::default());
        assert!(snapshot.positions.is_empty());
        assert!(snapshot.option_positions.is_empty());
        assert!(snapshot.orders.is_empty());

        let serialized = serde_json::to_value(&snapshot).unwrap();
        assert!(serialized["balances"]["total_balance"].is_null());
        assert!(serialized["metadata"]["institution_name"].is_null());
    }

    #[test]
    fn test_missing_keys_at_every_depth() {
        let payload = json!({
            "account": { "balance": {} },
            "balances": [],
            "total_value": null,
            "positions": [
                {},
                { "symbol": { "symbol": { "exchange": null } } },
                { "symbol": "not-an-object", "units": "abc" },
                42
            ],
            "option_positions": [{ "symbol": { "option_symbol": { "underlying_symbol": {} } } }],
            "orders": [{ "option_symbol": {} }, { "option_symbol": null }]
        });

        let snapshot = FullSnapshot::from_holdings(&payload).unwrap();

        assert!(snapshot.balances.total_balance.is_none());
        assert!(snapshot.balances.cash_available.is_none());
        assert!(snapshot.balances.total_portfolio_value.is_none());

        assert_eq!(snapshot.positions.len(), 4);
        for record in &snapshot.positions {
            assert_eq!(record, &PositionRecord::default());
        }

        assert_eq!(snapshot.option_positions[0], OptionPositionRecord::default());
        assert!(snapshot.orders.iter().all(|o| o.option_symbol.is_none()));
    }

    #[test]
    fn test_wrong_container_types_degrade() {
        let payload = json!({
            "account": "acc-123",
            "balances": { "cash": 10 },
            "positions": { "AAPL": {} },
            "orders": "none"
        });

        let snapshot = FullSnapshot::from_holdings(&payload).unwrap();
        assert!(snapshot.metadata.account_id.is_none());
        assert!(snapshot.balances.cash_available.is_none());
        assert!(snapshot.positions.is_empty());
        assert!(snapshot.orders.is_empty());
    }

    #[test]
    fn test_non_object_payload_fails() {
        for raw in [json!(null), json!([]), json!("holdings"), json!(3)] {
            let err = FullSnapshot::from_holdings(&raw).unwrap_err();
            assert!(matches!(err, HoldingsError::InvalidPayload(_)));
        }
    }

    #[test]
    fn test_pulled_at_is_injected() {
        let at = DateTime::parse_from_rfc3339("2025-03-14T09:30:00Z").unwrap().with_timezone(&Utc);
        let snapshot = FullSnapshot::from_holdings_at(&json!({}), at).unwrap();
        assert_eq!(snapshot.metadata.pulled_at, at);
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal("1500.25"), Some(dec!(1500.25)));
        assert_eq!(parse_decimal("1.5e-7"), Some(dec!(0.00000015)));
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn test_unrepresentable_numbers_read_as_none() {
        let snapshot = FullSnapshot::from_holdings_at(
            &json!({
                "positions": [{ "units": 1e30, "price": "1e-100", "open_pnl": "-1e29" }]
            }),
            Utc::now(),
        )
        .unwrap();

        let position = &snapshot.positions[0];
        assert_eq!(position.units, None);
        assert_eq!(position.current_price, None);
        assert_eq!(position.open_pnl, None);
    }
}
