//! Simulation output port.

use crate::domain::error::SimError;
use crate::domain::simulation::SimulationResult;

/// Port for persisting simulation result tables.
pub trait ReportPort {
    fn write(&self, result: &SimulationResult) -> Result<(), SimError>;

    /// Default implementation: writes each result in order, stopping at the first error.
    fn write_all(&self, results: &[SimulationResult]) -> Result<(), SimError> {
        results.iter().try_for_each(|r| self.write(r))
    }
}
