//! A single round: keep stepping until a stop point or the target step.

use crate::grid::{GridConfiguration, HouseEdge};
use crate::odds::{max_step_for_grid, multiplier_for_step, roll_step_success, RandomSource};
use serde::{Deserialize, Serialize};

/// The target a caller asked for and the one actually played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetStep {
    pub requested: u32,
    pub effective: u32,
}

impl TargetStep {
    /// Clamp `requested` into `1..=max_step_for_grid(cfg)`.
    pub fn resolve(requested: u32, cfg: &GridConfiguration) -> Self {
        Self {
            requested,
            effective: requested.clamp(1, max_step_for_grid(cfg)),
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.requested != self.effective
    }
}

/// Result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub won: bool,
    /// Safe steps taken before cashing out or hitting a stop point.
    pub steps_reached: u32,
    pub payout: f64,
    /// Only present on a win.
    pub multiplier: Option<f64>,
}

/// A round together with the target it was played against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedRound {
    pub outcome: RoundOutcome,
    pub target: TargetStep,
}

/// Play one round of `bet` aiming for `target_step`. Targets outside the
/// practical range are clamped and the adjustment is reported in
/// [`SimulatedRound::target`].
pub fn simulate_round<R: RandomSource + ?Sized>(
    cfg: &GridConfiguration,
    edge: HouseEdge,
    bet: f64,
    target_step: u32,
    rng: &mut R,
) -> SimulatedRound {
    let target = TargetStep::resolve(target_step, cfg);
    SimulatedRound {
        outcome: play_round(cfg, edge, bet, target.effective, rng),
        target,
    }
}

/// Round loop against an already-resolved target.
pub(crate) fn play_round<R: RandomSource + ?Sized>(
    cfg: &GridConfiguration,
    edge: HouseEdge,
    bet: f64,
    target: u32,
    rng: &mut R,
) -> RoundOutcome {
    for step in 1..=target {
        if !roll_step_success(step, cfg, rng) {
            return RoundOutcome {
                won: false,
                steps_reached: step - 1,
                payout: 0.0,
                multiplier: None,
            };
        }
    }

    let multiplier = multiplier_for_step(target, cfg, edge);
    RoundOutcome {
        won: true,
        steps_reached: target,
        payout: bet * multiplier,
        multiplier: Some(multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small() -> GridConfiguration {
        GridConfiguration::new(3, 3, 1).unwrap()
    }

    /// Replays a fixed list of samples.
    struct Scripted(Vec<f64>);

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_win_pays_bet_times_multiplier() {
        let cfg = small();
        let mut src = Scripted(vec![0.0, 0.0]);
        let round = simulate_round(&cfg, HouseEdge::default(), 10.0, 2, &mut src);
        assert!(round.outcome.won);
        assert_eq!(round.outcome.steps_reached, 2);
        let m = multiplier_for_step(2, &cfg, HouseEdge::default());
        assert_eq!(round.outcome.multiplier, Some(m));
        assert!((round.outcome.payout - 10.0 * m).abs() < 1e-12);
        assert!(!round.target.was_clamped());
    }

    #[test]
    fn test_loss_reports_steps_before_failure() {
        let cfg = small();
        // step 1 safe, step 2 fails (0.99 >= 7/8)
        let mut src = Scripted(vec![0.1, 0.99, 0.0]);
        let round = simulate_round(&cfg, HouseEdge::default(), 10.0, 5, &mut src);
        assert!(!round.outcome.won);
        assert_eq!(round.outcome.steps_reached, 1);
        assert_eq!(round.outcome.payout, 0.0);
        assert_eq!(round.outcome.multiplier, None);
        // stops drawing after the failed step
        assert_eq!(src.0.len(), 1);
    }

    #[test]
    fn test_first_step_failure_reaches_zero() {
        let mut src = Scripted(vec![0.95]);
        let round = simulate_round(&small(), HouseEdge::default(), 1.0, 3, &mut src);
        assert!(!round.outcome.won);
        assert_eq!(round.outcome.steps_reached, 0);
    }

    #[test]
    fn test_target_clamped_to_practical_max() {
        let cfg = small();
        let target = TargetStep::resolve(50, &cfg);
        assert_eq!(target.effective, 7);
        assert!(target.was_clamped());

        let zero = TargetStep::resolve(0, &cfg);
        assert_eq!(zero.effective, 1);
        assert!(zero.was_clamped());
    }

    #[test]
    fn test_clamped_round_matches_max_target_round() {
        let cfg = small();
        for seed in 0..50 {
            let mut a = ChaCha8Rng::seed_from_u64(seed);
            let mut b = ChaCha8Rng::seed_from_u64(seed);
            let clamped = simulate_round(&cfg, HouseEdge::default(), 5.0, 99, &mut a);
            let exact = simulate_round(&cfg, HouseEdge::default(), 5.0, 7, &mut b);
            assert_eq!(clamped.outcome, exact.outcome);
            assert!(clamped.target.was_clamped());
            assert!(!exact.target.was_clamped());
        }
    }
}
