//! Monte Carlo runner: many rounds against one bankroll, optionally sharded.

use super::config::{RunParams, SimConfig};
use super::report::SimReport;
use super::round::{play_round, TargetStep};
use super::summary::{SimulationSummary, StopReason, SummaryAccumulator};
use crate::book::OddsBook;
use crate::error::{InvalidParameterError, SimulationError};
use crate::grid::{GridConfiguration, HouseEdge};
use crate::odds::{max_step_for_grid, RandomSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cooperative stop signal, checked between rounds.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Play up to `params.rounds` rounds from one balance.
pub fn run_simulation<R: RandomSource + ?Sized>(
    params: &RunParams,
    cfg: &GridConfiguration,
    edge: HouseEdge,
    rng: &mut R,
) -> Result<SimulationSummary, InvalidParameterError> {
    run_simulation_with_cancel(params, cfg, edge, rng, &CancelToken::new())
}

/// [`run_simulation`] that stops early once `cancel` fires. The partial
/// summary reports the rounds actually played.
pub fn run_simulation_with_cancel<R: RandomSource + ?Sized>(
    params: &RunParams,
    cfg: &GridConfiguration,
    edge: HouseEdge,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<SimulationSummary, InvalidParameterError> {
    params.validate()?;
    let target = resolve_target(params, cfg);
    Ok(run_rounds(params, cfg, edge, target, rng, cancel))
}

fn resolve_target(params: &RunParams, cfg: &GridConfiguration) -> TargetStep {
    let target = TargetStep::resolve(params.target_step, cfg);
    if target.was_clamped() {
        log::warn!(
            "target step {} outside 1..={}, clamped to {}",
            target.requested,
            max_step_for_grid(cfg),
            target.effective
        );
    }
    target
}

/// Round loop over validated params and a resolved target.
fn run_rounds<R: RandomSource + ?Sized>(
    params: &RunParams,
    cfg: &GridConfiguration,
    edge: HouseEdge,
    target: TargetStep,
    rng: &mut R,
    cancel: &CancelToken,
) -> SimulationSummary {
    let mut stats = SummaryAccumulator::new(params.start_balance, params.rounds, target);
    let mut stop_reason = StopReason::Completed;

    for _ in 0..params.rounds {
        if cancel.is_cancelled() {
            stop_reason = StopReason::Cancelled;
            break;
        }
        if stats.balance < params.bet {
            stop_reason = StopReason::InsufficientFunds;
            break;
        }

        stats.place_bet(params.bet);
        let outcome = play_round(cfg, edge, params.bet, target.effective, rng);
        stats.settle(&outcome);
    }

    let summary = stats.finish(stop_reason);
    log::debug!(
        "run finished: {}/{} rounds, rtp {:.4}, {:?}",
        summary.rounds_completed,
        summary.rounds_requested,
        summary.rtp,
        summary.stop_reason
    );
    summary
}

/// Split `params.rounds` across `shards` independent trajectories in
/// parallel. Shard `i` draws from `ChaCha8Rng` seeded with `seed + i`.
///
/// Each shard starts from `params.start_balance` on its own, so the result
/// is balance-agnostic: bankroll exhaustion is per shard and the merged
/// drawdown is the worst single-shard value, not that of one sequential
/// walk. See [`SimulationSummary::merge_shards`] for the balance fields.
pub fn run_sharded(
    params: &RunParams,
    cfg: &GridConfiguration,
    edge: HouseEdge,
    seed: u64,
    shards: usize,
    cancel: &CancelToken,
) -> Result<SimulationSummary, InvalidParameterError> {
    let (target, summaries) = play_shards(params, cfg, edge, seed, shards, cancel)?;
    Ok(SimulationSummary::merge_shards(
        params.start_balance,
        params.rounds,
        target,
        &summaries,
    ))
}

/// Per-shard summaries, in shard order, before merging.
fn play_shards(
    params: &RunParams,
    cfg: &GridConfiguration,
    edge: HouseEdge,
    seed: u64,
    shards: usize,
    cancel: &CancelToken,
) -> Result<(TargetStep, Vec<SimulationSummary>), InvalidParameterError> {
    params.validate()?;
    if shards == 0 {
        return Err(InvalidParameterError::ZeroShards);
    }

    let target = resolve_target(params, cfg);

    let shard_rounds = split_rounds(params.rounds, shards);
    let summaries: Vec<SimulationSummary> = shard_rounds
        .par_iter()
        .enumerate()
        .map(|(i, &rounds)| {
            let shard_seed = seed.wrapping_add(i as u64);
            log::debug!("shard {i}: {rounds} rounds, seed {shard_seed}");
            let mut rng = ChaCha8Rng::seed_from_u64(shard_seed);
            let shard_params = RunParams {
                rounds,
                ..params.clone()
            };
            run_rounds(&shard_params, cfg, edge, target, &mut rng, cancel)
        })
        .collect();
    Ok((target, summaries))
}

/// Even split of `rounds` over at most `shards` non-empty shards.
fn split_rounds(rounds: u64, shards: usize) -> Vec<u64> {
    let shards = (shards as u64).min(rounds).max(1);
    let base = rounds / shards;
    let extra = rounds % shards;
    (0..shards).map(|i| base + u64::from(i < extra)).collect()
}

/// Resolve the grid in `book`, run the batch and wrap it in a report.
pub fn run_batch(config: &SimConfig, book: &OddsBook) -> Result<SimReport, SimulationError> {
    run_batch_with_cancel(config, book, &CancelToken::new())
}

pub fn run_batch_with_cancel(
    config: &SimConfig,
    book: &OddsBook,
    cancel: &CancelToken,
) -> Result<SimReport, SimulationError> {
    config.validate()?;
    let grid_id = config.params.grid.as_str();
    let cfg = *book.grid(grid_id)?;
    let edge = book.house_edge();
    let run = &config.params.run;

    let start = Instant::now();
    let summary = if config.shards <= 1 {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        run_simulation_with_cancel(run, &cfg, edge, &mut rng, cancel)?
    } else {
        let seed = config.seed.unwrap_or_else(rand::random);
        let (target, shards) = play_shards(run, &cfg, edge, seed, config.shards, cancel)?;
        if config.verbosity >= 2 {
            for (i, s) in shards.iter().enumerate() {
                println!(
                    "Shard {}/{} - Rounds {}/{}, RTP {:.4}, End {:.2}, Peak {:.2}, {:?}",
                    i + 1,
                    shards.len(),
                    s.rounds_completed,
                    s.rounds_requested,
                    s.rtp,
                    s.end_balance,
                    s.peak_balance,
                    s.stop_reason
                );
            }
        }
        SimulationSummary::merge_shards(run.start_balance, run.rounds, target, &shards)
    };
    let elapsed = start.elapsed();

    log::info!(
        "{grid_id}: {} rounds in {:.2?}, rtp {:.4} (house edge {})",
        summary.rounds_completed,
        elapsed,
        summary.rtp,
        edge.value()
    );

    Ok(SimReport::new(grid_id, &cfg, edge, config, summary, elapsed))
}
