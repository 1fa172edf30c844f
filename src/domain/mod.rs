//! Core simulation types and logic.

pub mod trading_day;
pub mod price_series;
pub mod indicator;
pub mod trader;
pub mod strategy;
pub mod simulation;
pub mod universe;
pub mod config_validation;
pub mod error;
