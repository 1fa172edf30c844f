#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use stocksim::domain::error::SimError;
use stocksim::domain::price_series::PriceSeries;
use stocksim::domain::simulation::SimulationResult;
pub use stocksim::domain::trading_day::TradingDay;
use stocksim::ports::data_port::DataPort;
use stocksim::ports::report_port::ReportPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<TradingDay>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_days(mut self, code: &str, days: Vec<TradingDay>) -> Self {
        self.data.insert(code.to_string(), days);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self, code: &str) -> Result<PriceSeries, SimError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(SimError::DataFormat {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(days) => Ok(PriceSeries::new(code, days.clone())),
            None => Err(SimError::DataFormat {
                reason: format!("no file for {}", code),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, SimError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// Collects written results in memory.
pub struct MockReportPort {
    pub written: RefCell<Vec<SimulationResult>>,
}

impl MockReportPort {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for MockReportPort {
    fn write(&self, result: &SimulationResult) -> Result<(), SimError> {
        self.written.borrow_mut().push(result.clone());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_day(date: &str, open: i64, close: i64) -> TradingDay {
    TradingDay {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open,
        high: open.max(close) + 100,
        low: open.min(close) - 100,
        close,
        adj_close: close,
        volume: 1_000_000,
    }
}

/// Deterministic zig-zag trend: rises with a pullback every few days.
pub fn generate_days(start_date: &str, count: usize, start_price: i64) -> Vec<TradingDay> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let i = i as i64;
            let wobble = [0, 150, -80, 220, -310, 90, 40][(i % 7) as usize];
            let open = start_price + i * 25 + wobble;
            let close = open + if i % 3 == 0 { -60 } else { 45 };
            TradingDay {
                date: start + chrono::Duration::days(i),
                open,
                high: open.max(close) + 50,
                low: open.min(close) - 50,
                close,
                adj_close: close,
                volume: 1_000_000 + i * 10,
            }
        })
        .collect()
}

pub fn generate_series(name: &str, count: usize, start_price: i64) -> PriceSeries {
    PriceSeries::new(name, generate_days("2017-01-02", count, start_price))
}
