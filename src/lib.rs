//! Stepwager - odds and Monte Carlo tooling for a grid step-wager game.
//!
//! [`odds`] answers per-step questions (survival chance, payout multiplier,
//! one sampled step). [`simulator`] plays many rounds to check that the
//! realized return converges on the house edge. [`book::OddsBook`] bundles
//! both behind grid identifiers for front ends.

pub mod book;
pub mod build_info;
pub mod error;
pub mod grid;
pub mod odds;
pub mod simulator;

pub use book::OddsBook;
pub use error::{ConfigurationError, InvalidParameterError, SimulationError};
pub use grid::{GridConfiguration, GridRegistry, HouseEdge};
pub use odds::RandomSource;
pub use simulator::{RoundOutcome, SimConfig, SimParams, SimulationSummary};
