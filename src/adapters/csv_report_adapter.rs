//! CSV result table adapter.
//!
//! Writes one file per (stock, trader) to `<output_dir>/<STOCK> <Trader>.csv`.

use crate::domain::error::SimError;
use crate::domain::simulation::SimulationResult;
use crate::domain::trading_day::format_cents;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const REPORT_HEADER: [&str; 5] = ["Date", "Balance", "Shares", "Share Price", "Value of Shares"];

pub struct CsvReportAdapter {
    output_dir: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn report_path(&self, result: &SimulationResult) -> PathBuf {
        self.output_dir
            .join(format!("{} {}.csv", result.stock, result.trader))
    }
}

/// Render a result table as CSV into `writer`.
pub fn write_table<W: Write>(writer: W, result: &SimulationResult) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| SimError::Io(std::io::Error::other(e));

    wtr.write_record(REPORT_HEADER).map_err(csv_err)?;
    for record in &result.records {
        wtr.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            format_cents(record.balance),
            record.shares.to_string(),
            format_cents(record.share_price),
            format_cents(record.share_value),
        ])
        .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &SimulationResult) -> Result<(), SimError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.report_path(result);
        let file = fs::File::create(&path)?;
        write_table(file, result)?;
        tracing::info!(path = %path.display(), rows = result.records.len(), "wrote report");
        Ok(())
    }
}
