//! Daily OHLCV record and cent-denominated money helpers.

use chrono::NaiveDate;

/// One day of price data. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingDay {
    pub date: NaiveDate,
    pub open: i64,
    pub high: i64,
    pub low: i64,
    pub close: i64,
    pub adj_close: i64,
    pub volume: i64,
}

/// Convert a decimal currency amount to cents, rounding half away from zero.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Render cents as a decimal amount with two fraction digits.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
