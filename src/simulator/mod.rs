//! Monte Carlo simulator for checking the long-run return of a grid.
//!
//! Plays many independent rounds against a bankroll and reports realized
//! RTP, win rate, drawdown and streaks. Rounds are independent, so large
//! runs can be sharded across threads with one seeded generator per shard.

mod config;
mod report;
mod round;
mod runner;
mod summary;

pub use crate::odds::max_step_for_grid;
pub use config::{RunParams, SimConfig, SimParams};
pub use report::SimReport;
pub use round::{simulate_round, RoundOutcome, SimulatedRound, TargetStep};
pub use runner::{
    run_batch, run_batch_with_cancel, run_sharded, run_simulation, run_simulation_with_cancel,
    CancelToken,
};
pub use summary::{SimulationSummary, StopReason};
