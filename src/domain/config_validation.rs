//! Configuration validation.
//!
//! Checks the `[simulation]` section before any price data is read. Absent keys
//! are valid (defaults apply); present keys must parse.

use crate::domain::error::SimError;
use crate::domain::strategy::TradeStrategy;
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;

pub const SECTION: &str = "simulation";

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), SimError> {
    validate_starting_balance(config)?;
    validate_codes(config)?;
    validate_traders(config)?;
    Ok(())
}

fn invalid(key: &str, reason: String) -> SimError {
    SimError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn validate_starting_balance(config: &dyn ConfigPort) -> Result<(), SimError> {
    match config.get_double(SECTION, "starting_balance")? {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(invalid(
            "starting_balance",
            "starting_balance must be positive".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), SimError> {
    if let Some(codes) = config.get_string(SECTION, "codes") {
        parse_codes(&codes).map_err(|e| invalid("codes", e.to_string()))?;
    }
    Ok(())
}

fn validate_traders(config: &dyn ConfigPort) -> Result<(), SimError> {
    let Some(traders) = config.get_list(SECTION, "traders") else {
        return Ok(());
    };
    if traders.is_empty() {
        return Err(invalid("traders", "at least one trader is required".to_string()));
    }
    for spec in &traders {
        spec.parse::<TradeStrategy>()
            .map_err(|reason| invalid("traders", reason))?;
    }
    Ok(())
}
