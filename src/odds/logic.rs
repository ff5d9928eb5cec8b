//! Shrinking-pool odds.
//!
//! A round draws cells without replacement. Before step `n` the pool still
//! holds every stop point but `n - 1` fewer safe cells, so the chance of
//! the next draw being safe drops with each step taken.

use super::random::RandomSource;
use crate::grid::{GridConfiguration, HouseEdge};

/// Chance that step `step` (1-based) lands on a safe cell, given every
/// earlier step did. Returns 0 for step 0 and for any step past the last
/// safe cell; callers must treat 0 as "unreachable", not as a tiny chance.
pub fn step_probability(step: u32, cfg: &GridConfiguration) -> f64 {
    if step == 0 {
        return 0.0;
    }
    let taken = step - 1;
    let total_remaining = cfg.total_cells().saturating_sub(taken);
    let safe_remaining = cfg.safe_cells().saturating_sub(taken);
    if total_remaining == 0 || safe_remaining == 0 {
        return 0.0;
    }
    safe_remaining as f64 / total_remaining as f64
}

/// Zero-edge multiplier for reaching `step`: the product of the inverse
/// step probabilities. 0 for step 0 and for unreachable steps.
pub fn fair_multiplier_for_step(step: u32, cfg: &GridConfiguration) -> f64 {
    if step == 0 {
        return 0.0;
    }
    if step > cfg.safe_cells() {
        return 0.0;
    }
    let mut fair = 1.0;
    for s in 1..=step {
        let p = step_probability(s, cfg);
        if p <= 0.0 {
            return 0.0;
        }
        fair /= p;
    }
    fair
}

/// Payout multiplier for cashing out at `step`. The house edge scales the
/// whole product once; it does not compound per step.
pub fn multiplier_for_step(step: u32, cfg: &GridConfiguration, edge: HouseEdge) -> f64 {
    fair_multiplier_for_step(step, cfg) * edge.value()
}

/// Decide one step. Consumes exactly one sample from `rng`.
pub fn roll_step_success<R: RandomSource + ?Sized>(
    step: u32,
    cfg: &GridConfiguration,
    rng: &mut R,
) -> bool {
    rng.next_unit() < step_probability(step, cfg)
}

/// Chance of surviving steps `1..=step` in a row. 1 for step 0.
pub fn survival_probability(step: u32, cfg: &GridConfiguration) -> f64 {
    if step > cfg.safe_cells() {
        return 0.0;
    }
    (1..=step).map(|s| step_probability(s, cfg)).product()
}

/// Long-run return of always targeting `step`. Equals the house edge for
/// every reachable step.
pub fn expected_return(step: u32, cfg: &GridConfiguration, edge: HouseEdge) -> f64 {
    survival_probability(step, cfg) * multiplier_for_step(step, cfg, edge)
}

/// Highest step offered as a target. The last safe cell is left out: its
/// draw is the least likely and its multiplier the least useful to show.
pub fn max_step_for_grid(cfg: &GridConfiguration) -> u32 {
    cfg.safe_cells() - 1
}

/// First practical step whose multiplier reaches `target`.
pub fn step_for_target_multiplier(
    target: f64,
    cfg: &GridConfiguration,
    edge: HouseEdge,
) -> Option<u32> {
    (1..=max_step_for_grid(cfg)).find(|&s| multiplier_for_step(s, cfg, edge) >= target)
}
