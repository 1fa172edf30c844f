//! Stock universe: code list parsing and loading through a [`DataPort`].
//!
//! A code that fails to load aborts the whole load. Codes with no trading days
//! are skipped with a warning; loading fails only if every code is skipped.

use crate::domain::error::SimError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),
}

pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(UniverseError::DuplicateCode(code));
        }
        codes.push(code);
    }

    Ok(codes)
}

pub struct LoadedUniverse {
    pub series: Vec<PriceSeries>,
    /// Codes whose data loaded cleanly but held no trading days.
    pub skipped: Vec<String>,
}

pub fn load_universe(data_port: &dyn DataPort, codes: &[String]) -> Result<LoadedUniverse, SimError> {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for code in codes {
        let loaded = data_port.load_series(code)?;

        if loaded.is_empty() {
            tracing::warn!(%code, "skipping stock: no trading days");
            skipped.push(code.clone());
            continue;
        }

        tracing::info!(%code, days = loaded.len(), "loaded");
        series.push(loaded);
    }

    if series.is_empty() {
        return Err(SimError::NoData {
            code: codes.join(","),
        });
    }

    Ok(LoadedUniverse { series, skipped })
}
