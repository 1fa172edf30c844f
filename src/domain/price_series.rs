//! Price series with a "current day" cursor.
//!
//! The cursor starts before the first day (`None`). Each `advance_day` moves it
//! forward by exactly one and refreshes the current date and share price (the open
//! of the day at the cursor). `reset` rewinds to before the first day so the same
//! data can be replayed for another trader without reloading it.

use chrono::NaiveDate;

use super::error::SimError;
use super::indicator::{rsi, sma};
use super::trading_day::TradingDay;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    name: String,
    days: Vec<TradingDay>,
    cursor: Option<usize>,
}

impl PriceSeries {
    pub fn new(name: impl Into<String>, days: Vec<TradingDay>) -> Self {
        Self {
            name: name.into(),
            days,
            cursor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn days(&self) -> &[TradingDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Index of the current day, `None` before the first advance.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_day(&self) -> Option<&TradingDay> {
        self.cursor.map(|c| &self.days[c])
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_day().map(|d| d.date)
    }

    /// Open price of the current day in cents; 0 before the first advance.
    pub fn current_share_price(&self) -> i64 {
        self.current_day().map_or(0, |d| d.open)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn advance_day(&mut self) -> Result<(), SimError> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.days.len() {
            return Err(SimError::OutOfRange {
                cursor: self.cursor,
                window: 1,
                len: self.days.len(),
            });
        }
        self.cursor = Some(next);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Mean close of the `n` days before the current day.
    pub fn moving_average(&self, n: usize) -> Result<f64, SimError> {
        sma::moving_average(&self.days, self.cursor, n)
    }

    /// RSI over the `n` days before the current day.
    pub fn relative_strength_index(&self, n: usize) -> Result<f64, SimError> {
        rsi::relative_strength_index(&self.days, self.cursor, n)
    }
}
