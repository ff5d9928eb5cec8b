//! Simulation configuration.

use crate::error::InvalidParameterError;
use crate::grid::DEFAULT_GRID;
use serde::{Deserialize, Serialize};

/// Bankroll and betting parameters for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    /// Rounds to attempt; fewer are played if the balance runs out.
    pub rounds: u64,
    pub start_balance: f64,
    /// Stake per round.
    pub bet: f64,
    /// Step to cash out at. Clamped to the grid's practical range.
    pub target_step: u32,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            rounds: 100_000,
            start_balance: 1_000.0,
            bet: 10.0,
            target_step: 3,
        }
    }
}

impl RunParams {
    /// Reject malformed parameters before any round is played.
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        if self.rounds == 0 {
            return Err(InvalidParameterError::ZeroRounds);
        }
        if !(self.bet.is_finite() && self.bet > 0.0) {
            return Err(InvalidParameterError::Bet(self.bet));
        }
        if !(self.start_balance.is_finite() && self.start_balance > 0.0) {
            return Err(InvalidParameterError::StartBalance(self.start_balance));
        }
        Ok(())
    }
}

/// Interchange record for reporting front ends: run parameters plus the
/// grid they apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    pub grid: String,
    #[serde(flatten)]
    pub run: RunParams,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID.to_string(),
            run: RunParams::default(),
        }
    }
}

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub params: SimParams,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Number of independent shards; 1 runs a single balance trajectory
    pub shards: usize,

    /// Output verbosity (0 = silent, 1 = summary, 2 = per-shard progress)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            params: SimParams::default(),
            seed: None,
            shards: 1,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for a quick sanity check of a grid.
    pub fn quick_check(grid: &str) -> Self {
        Self {
            params: SimParams {
                grid: grid.to_string(),
                run: RunParams {
                    rounds: 10_000,
                    ..Default::default()
                },
            },
            ..Default::default()
        }
    }

    /// Large run with a bankroll that can never run dry, for checking that
    /// realized RTP converges on the house edge.
    pub fn convergence_check(grid: &str, target_step: u32) -> Self {
        let rounds = 1_000_000;
        let bet = 1.0;
        Self {
            params: SimParams {
                grid: grid.to_string(),
                run: RunParams {
                    rounds,
                    start_balance: bet * rounds as f64,
                    bet,
                    target_step,
                },
            },
            seed: Some(42),
            shards: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            verbosity: 1,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        if self.shards == 0 {
            return Err(InvalidParameterError::ZeroShards);
        }
        self.params.run.validate()
    }
}
