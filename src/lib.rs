//! stocksim: day-by-day trading strategy simulator.
//!
//! Hexagonal architecture: simulation logic in [`domain`], port traits in [`ports`],
//! CSV/INI implementations in [`adapters`], command-line dispatch in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
