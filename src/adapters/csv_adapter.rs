//! CSV price data adapter.
//!
//! Reads `<base_path>/<CODE>.csv` in the Yahoo Finance export layout:
//! `Date,Open,High,Low,Close,Adj Close,Volume`, oldest day first.

use crate::domain::error::SimError;
use crate::domain::price_series::PriceSeries;
use crate::domain::trading_day::{to_cents, TradingDay};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, name: &str, row: usize) -> Result<&'a str, SimError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| SimError::DataFormat {
            reason: format!("row {}: missing {} column", row, name),
        })
}

fn price_field(record: &csv::StringRecord, index: usize, name: &str, row: usize) -> Result<i64, SimError> {
    let raw = field(record, index, name, row)?;
    let value: f64 = raw.parse().map_err(|e| SimError::DataFormat {
        reason: format!("row {}: invalid {} value '{}': {}", row, name, raw, e),
    })?;
    if !value.is_finite() {
        return Err(SimError::DataFormat {
            reason: format!("row {}: invalid {} value '{}'", row, name, raw),
        });
    }
    Ok(to_cents(value))
}

pub fn parse_trading_days(content: &str) -> Result<Vec<TradingDay>, SimError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut days = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let row = i + 2;
        let record = result.map_err(|e| SimError::DataFormat {
            reason: format!("CSV parse error: {}", e),
        })?;

        let date_str = field(&record, 0, "date", row)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            SimError::DataFormat {
                reason: format!("row {}: invalid date '{}': {}", row, date_str, e),
            }
        })?;

        let volume_str = field(&record, 6, "volume", row)?;
        let volume: i64 = volume_str.parse().map_err(|e| SimError::DataFormat {
            reason: format!("row {}: invalid volume value '{}': {}", row, volume_str, e),
        })?;

        days.push(TradingDay {
            date,
            open: price_field(&record, 1, "open", row)?,
            high: price_field(&record, 2, "high", row)?,
            low: price_field(&record, 3, "low", row)?,
            close: price_field(&record, 4, "close", row)?,
            adj_close: price_field(&record, 5, "adj close", row)?,
            volume,
        });
    }

    Ok(days)
}

impl DataPort for CsvAdapter {
    fn load_series(&self, code: &str) -> Result<PriceSeries, SimError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| SimError::DataFormat {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let days = parse_trading_days(&content)?;
        tracing::debug!(%code, path = %path.display(), days = days.len(), "read price history");
        Ok(PriceSeries::new(code, days))
    }

    fn list_symbols(&self) -> Result<Vec<String>, SimError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SimError::DataFormat {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(".csv") {
                symbols.push(code.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
