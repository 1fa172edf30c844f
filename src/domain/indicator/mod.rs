//! Windowed indicator calculations over a price series.
//!
//! Every indicator is evaluated "as of" a cursor position and only reads closes
//! strictly before the cursor day, so a simulation never looks ahead.
//! - `IndicatorType`: indicator identity + window, used for display and logging
//! - [`sma::moving_average`]: mean close over `[cursor - n, cursor)`
//! - [`rsi::relative_strength_index`]: up/down move ratio over the same window

pub mod rsi;
pub mod sma;

use std::fmt;

use crate::domain::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
}

impl IndicatorType {
    /// Smallest cursor at which the indicator can be evaluated.
    pub fn first_valid_cursor(&self) -> usize {
        match self {
            IndicatorType::Sma(n) => *n,
            // first difference reads the day before the window
            IndicatorType::Rsi(n) => n + 1,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

/// Resolve the cursor for a window of `lookback` days, or fail if it reaches
/// before the first day.
pub(crate) fn window_end(
    cursor: Option<usize>,
    lookback: usize,
    window: usize,
    len: usize,
) -> Result<usize, SimError> {
    match cursor {
        Some(c) if c >= lookback && c < len => Ok(c),
        _ => Err(SimError::OutOfRange {
            cursor,
            window,
            len,
        }),
    }
}
