//! Simple moving average of closing prices.
//!
//! Window: the `n` days strictly before the cursor, `[cursor - n, cursor)`.
//! The cursor day itself is excluded because its close is not yet known when the
//! simulation trades at the open.

use crate::domain::error::SimError;
use crate::domain::indicator::window_end;
use crate::domain::trading_day::TradingDay;

pub fn moving_average(days: &[TradingDay], cursor: Option<usize>, n: usize) -> Result<f64, SimError> {
    if n == 0 {
        return Err(SimError::DivideByZero);
    }
    let end = window_end(cursor, n, n, days.len())?;
    let sum: i64 = days[end - n..end].iter().map(|d| d.close).sum();
    Ok(sum as f64 / n as f64)
}
