//! Price data access port.

use crate::domain::error::SimError;
use crate::domain::price_series::PriceSeries;

pub trait DataPort {
    /// Load the full chronological day history for `code`.
    fn load_series(&self, code: &str) -> Result<PriceSeries, SimError>;

    fn list_symbols(&self) -> Result<Vec<String>, SimError>;
}
