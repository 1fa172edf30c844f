//! RSI (Relative Strength Index) over a trailing window of closes.
//!
//! For each day `i` in `[cursor - n, cursor)` the move is `close[i] - close[i - 1]`.
//! Non-negative moves count as gains, negative moves as losses (by magnitude), and
//! each side is averaged over its own count:
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! No gains: RSI = 0. Gains but no losses: RSI = 100.
//!
//! The first move reads day `cursor - n - 1`, so the earliest valid cursor is `n + 1`.

use chrono::NaiveDate;

use crate::domain::error::SimError;
use crate::domain::indicator::window_end;
use crate::domain::trading_day::TradingDay;

pub fn relative_strength_index(
    days: &[TradingDay],
    cursor: Option<usize>,
    n: usize,
) -> Result<f64, SimError> {
    if n == 0 {
        window_end(cursor, 0, n, days.len())?;
        return Ok(0.0);
    }
    let end = window_end(cursor, n + 1, n, days.len())?;

    let mut gains: Vec<i64> = Vec::with_capacity(n);
    let mut losses: Vec<i64> = Vec::with_capacity(n);

    for i in end - n..end {
        let change = days[i].close - days[i - 1].close;
        if change >= 0 {
            gains.push(change);
        } else {
            losses.push(-change);
        }
    }

    if gains.is_empty() {
        return Ok(0.0);
    }
    if losses.is_empty() {
        return Ok(100.0);
    }

    let avg_gain = gains.iter().sum::<i64>() as f64 / gains.len() as f64;
    let avg_loss = losses.iter().sum::<i64>() as f64 / losses.len() as f64;

    Ok(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

/// RSI as of every cursor where it is defined, paired with that day's date.
pub fn rsi_series(days: &[TradingDay], n: usize) -> Result<Vec<(NaiveDate, f64)>, SimError> {
    (n + 1..days.len())
        .map(|cursor| Ok((days[cursor].date, relative_strength_index(days, Some(cursor), n)?)))
        .collect()
}
