//! Per-step success probability and payout multiplier.
//!
//! Everything here is a pure function of the grid, the step index and (for
//! multipliers) the house edge. Sampling goes through an injected
//! [`RandomSource`] so rounds can be replayed from a seed.

pub mod logic;
pub mod random;
pub mod table;

pub use logic::*;
pub use random::RandomSource;
pub use table::{odds_table, StepOdds};
