//! Text Formatter
//!
//! Two deterministic renderings of a `SmallSnapshot`:
//!
//! - [`render_report`]: decorated summary for the terminal and the email body
//! - [`render_prompt`]: the same numbers without decoration, fed to the LLM
//!
//! Number formatting never consults the locale: `.` is the decimal point and
//! `,` the thousands separator.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{SmallPosition, SmallSnapshot};

const HEAVY_RULE_WIDTH: usize = 50;
const LIGHT_RULE_WIDTH: usize = 20;
const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN: &str = "Unknown";
const UP: &str = "🟢";
const DOWN: &str = "🔴";

/// Message rendered when no snapshot is stored for an account
#[must_use]
pub fn no_data_message(account_name: &str) -> String {
    format!("No holdings data available for account: {account_name}")
}

/// Human-readable portfolio summary
#[must_use]
pub fn render_report(account_name: &str, snapshot: Option<&SmallSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return no_data_message(account_name);
    };

    let heavy = "=".repeat(HEAVY_RULE_WIDTH);
    let light = "-".repeat(LIGHT_RULE_WIDTH);
    let balances = &snapshot.balances;
    let mut lines = vec![
        heavy.clone(),
        format!("PORTFOLIO SUMMARY - {}", snapshot.account.as_deref().unwrap_or(account_name)),
        heavy.clone(),
        format!("Snapshot Date: {}", format_timestamp(snapshot)),
        String::new(),
        "📊 ACCOUNT BALANCES".to_string(),
        light.clone(),
        format!("Total Balance: {}", money_or_na(balances.total_balance)),
        format!("Cash Available: {}", money_or_na(balances.cash_available)),
        format!("Buying Power: {}", money_or_na(balances.buying_power)),
    ];
    if let Some(value) = reported_portfolio_value(snapshot) {
        lines.push(format!("Portfolio Value: {}", money(value)));
    }
    lines.push(String::new());

    lines.push("📈 POSITIONS".to_string());
    lines.push(light.clone());

    if snapshot.positions.is_empty() {
        lines.push("No positions found".to_string());
    } else {
        for position in &snapshot.positions {
            lines.extend(position_lines(position, ""));
            let pnl = position.open_pnl.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |pnl| format!("{} {}", signed_money(pnl), indicator(pnl)),
            );
            lines.push(format!("  P&L: {pnl}"));
            lines.push(String::new());
        }

        let totals = snapshot.totals();
        lines.push("📋 PORTFOLIO SUMMARY".to_string());
        lines.push(light);
        lines.push(format!("Total Positions Value: {}", money_or_na(totals.position_value)));
        let total_pnl = totals.total_pnl.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |pnl| format!("{} {}", signed_money(pnl), indicator(pnl)),
        );
        lines.push(format!("Total P&L: {total_pnl}"));
        if let Some(percent) = totals.pnl_percent {
            lines.push(format!("P&L %: {} {}", signed_percent(percent), indicator(percent)));
        }
    }

    lines.push(String::new());
    lines.push(heavy);

    lines.join("\n")
}

/// Plain rendering used as the user message of the insight request
#[must_use]
pub fn render_prompt(account_name: &str, snapshot: Option<&SmallSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return no_data_message(account_name);
    };

    let balances = &snapshot.balances;
    let mut lines = vec![
        "PORTFOLIO SNAPSHOT".to_string(),
        format!("Account: {}", snapshot.account.as_deref().unwrap_or(account_name)),
        format!("Date: {}", format_timestamp(snapshot)),
        String::new(),
        "ACCOUNT BALANCES:".to_string(),
        format!("  Total Balance: {}", money_or_na(balances.total_balance)),
        format!("  Cash Available: {}", money_or_na(balances.cash_available)),
        format!("  Buying Power: {}", money_or_na(balances.buying_power)),
    ];
    if let Some(value) = reported_portfolio_value(snapshot) {
        lines.push(format!("  Portfolio Value: {}", money(value)));
    }
    lines.push(String::new());

    if snapshot.positions.is_empty() {
        lines.push("POSITIONS: No positions found".to_string());
        return lines.join("\n");
    }

    lines.push("POSITIONS:".to_string());
    for position in &snapshot.positions {
        lines.extend(position_lines(position, "  "));
        lines.push(format!("    P&L: {}", signed_money_or_na(position.open_pnl)));
        lines.push(String::new());
    }

    let totals = snapshot.totals();
    lines.push("PORTFOLIO SUMMARY:".to_string());
    lines.push(format!("  Total Positions Value: {}", money_or_na(totals.position_value)));
    lines.push(format!("  Total P&L: {}", signed_money_or_na(totals.total_pnl)));
    if let Some(percent) = totals.pnl_percent {
        lines.push(format!("  P&L %: {}", signed_percent(percent)));
    }

    lines.join("\n")
}

/// Symbol header plus units, price and value lines shared by both variants
fn position_lines(position: &SmallPosition, indent: &str) -> [String; 4] {
    [
        format!("{indent}{}:", position.symbol.as_deref().unwrap_or(UNKNOWN)),
        format!("{indent}  Units: {}", position.units.map_or_else(|| NOT_AVAILABLE.to_string(), |u| grouped(u, 4))),
        format!("{indent}  Current Price: {}", money_or_na(position.current_price)),
        format!("{indent}  Position Value: {}", money_or_na(position.value())),
    ]
}

/// Portfolio value line is shown only when the aggregator reported a nonzero value
fn reported_portfolio_value(snapshot: &SmallSnapshot) -> Option<Decimal> {
    snapshot.balances.total_portfolio_value.filter(|v| !v.is_zero())
}

fn format_timestamp(snapshot: &SmallSnapshot) -> String {
    snapshot.snapshot_date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn indicator(value: Decimal) -> &'static str {
    if is_negative_at(value, 2) { DOWN } else { UP }
}

/// `value` rounded half away from zero to `dp` places, without sign, with `,` grouping
#[must_use]
pub fn grouped(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero).abs();
    rounded.rescale(dp);
    let text = rounded.to_string();

    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let digits = int_part.len();
    let mut out = String::with_capacity(text.len() + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn is_negative_at(value: Decimal, dp: u32) -> bool {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.is_sign_negative() && !rounded.is_zero()
}

/// `$1,234.50` / `-$1,234.50`
#[must_use]
pub fn money(value: Decimal) -> String {
    let sign = if is_negative_at(value, 2) { "-" } else { "" };
    format!("{sign}${}", grouped(value, 2))
}

/// `+$25.50` / `-$3.00`
#[must_use]
pub fn signed_money(value: Decimal) -> String {
    let sign = if is_negative_at(value, 2) { "-" } else { "+" };
    format!("{sign}${}", grouped(value, 2))
}

/// `+1.70%` / `-0.25%`
#[must_use]
pub fn signed_percent(value: Decimal) -> String {
    let sign = if is_negative_at(value, 2) { "-" } else { "+" };
    format!("{sign}{}%", grouped(value, 2))
}

fn money_or_na(value: Option<Decimal>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), money)
}

fn signed_money_or_na(value: Option<Decimal>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), signed_money)
}
