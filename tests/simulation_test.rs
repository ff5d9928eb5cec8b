//! Integration tests: simulator behavior against the built-in grids.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stepwager::odds::{roll_step_success, step_probability};
use stepwager::simulator::{
    max_step_for_grid, run_sharded, run_simulation, simulate_round, CancelToken, RunParams,
    StopReason,
};
use stepwager::{GridConfiguration, HouseEdge, OddsBook, RandomSource, SimParams};

fn small() -> GridConfiguration {
    GridConfiguration::new(3, 3, 1).unwrap()
}

fn large() -> GridConfiguration {
    GridConfiguration::new(4, 4, 2).unwrap()
}

/// Always returns the same sample.
struct Constant(f64);

impl RandomSource for Constant {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

#[test]
fn test_reference_scenarios() {
    let book = OddsBook::builtin();
    assert!((book.step_probability("3x3", 1).unwrap() - 0.8889).abs() < 1e-4);
    assert!((book.multiplier_for_step("3x3", 1).unwrap() - 1.0575).abs() < 1e-4);
    assert!((book.step_probability("3x3", 7).unwrap() - 0.6667).abs() < 1e-4);
    assert_eq!(book.max_step("3x3").unwrap(), 7);

    assert_eq!(book.step_probability("4x4", 1).unwrap(), 0.875);
    assert_eq!(book.max_step("4x4").unwrap(), 13);
}

#[test]
fn test_roll_frequency_over_many_trials() {
    let cfg = large();
    let mut rng = ChaCha8Rng::seed_from_u64(31337);
    for step in [1, 7, 13] {
        let p = step_probability(step, &cfg);
        let trials = 100_000;
        let hits = (0..trials)
            .filter(|_| roll_step_success(step, &cfg, &mut rng))
            .count();
        let freq = hits as f64 / trials as f64;
        let stderr = (p * (1.0 - p) / trials as f64).sqrt();
        assert!(
            (freq - p).abs() < 4.0 * stderr,
            "step {step}: freq {freq:.5} vs p {p:.5}"
        );
    }
}

#[test]
fn test_clamped_target_matches_max_target() {
    let cfg = large();
    let max = max_step_for_grid(&cfg);
    let edge = HouseEdge::default();
    for seed in 0..200 {
        let mut a = ChaCha8Rng::seed_from_u64(seed);
        let mut b = ChaCha8Rng::seed_from_u64(seed);
        let over = simulate_round(&cfg, edge, 2.0, max + 10, &mut a);
        let exact = simulate_round(&cfg, edge, 2.0, max, &mut b);
        assert_eq!(over.outcome, exact.outcome);
        assert_eq!(over.target.effective, max);
        assert!(over.target.was_clamped());
    }
}

#[test]
fn test_always_safe_source_wins_every_round() {
    let cfg = small();
    let edge = HouseEdge::default();
    let params = RunParams {
        rounds: 20,
        start_balance: 100.0,
        bet: 10.0,
        target_step: 4,
    };
    let summary = run_simulation(&params, &cfg, edge, &mut Constant(0.0)).unwrap();
    assert_eq!(summary.wins, 20);
    assert_eq!(summary.longest_losing_streak, 0);
    assert_eq!(summary.max_drawdown, 0.0);
    let m = stepwager::odds::multiplier_for_step(4, &cfg, edge);
    assert!((summary.rtp - m).abs() < 1e-12);
    assert!((summary.largest_payout - 10.0 * m).abs() < 1e-12);
}

#[test]
fn test_always_failing_source_goes_broke() {
    let params = RunParams {
        rounds: 50,
        start_balance: 100.0,
        bet: 10.0,
        target_step: 2,
    };
    let summary =
        run_simulation(&params, &small(), HouseEdge::default(), &mut Constant(0.999)).unwrap();
    assert_eq!(summary.rounds_completed, 10);
    assert_eq!(summary.losses, 10);
    assert_eq!(summary.longest_losing_streak, 10);
    assert_eq!(summary.end_balance, 0.0);
    assert_eq!(summary.max_drawdown, 1.0);
    assert_eq!(summary.rtp, 0.0);
    assert_eq!(summary.stop_reason, StopReason::InsufficientFunds);
}

#[test]
fn test_start_balance_below_bet() {
    let book = OddsBook::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let params = SimParams {
        grid: "4x4".to_string(),
        run: RunParams {
            rounds: 10,
            start_balance: 4.99,
            bet: 5.0,
            target_step: 3,
        },
    };
    let summary = book.simulate(&params, &mut rng).unwrap();
    assert_eq!(summary.rounds_completed, 0);
    assert_eq!(summary.end_balance, 4.99);
    assert_eq!(summary.total_wagered, 0.0);
}

#[test]
fn test_cancelled_sharded_run_is_partial() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let params = RunParams {
        rounds: 1_000,
        start_balance: 1_000.0,
        bet: 1.0,
        target_step: 3,
    };
    let summary = run_sharded(&params, &small(), HouseEdge::default(), 5, 4, &cancel).unwrap();
    assert_eq!(summary.rounds_completed, 0);
    assert_eq!(summary.rounds_requested, 1_000);
    assert_eq!(summary.stop_reason, StopReason::Cancelled);
}

#[test]
fn test_summary_json_interchange() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let summary = OddsBook::builtin()
        .simulate(&SimParams::default(), &mut rng)
        .unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    let back: stepwager::SimulationSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.rounds_completed, summary.rounds_completed);
    assert_eq!(back.stop_reason, summary.stop_reason);
}

#[test]
fn test_custom_config_file_drives_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grids.json");
    std::fs::write(
        &path,
        r#"{"house_edge":0.9,"grids":{"5x5":{"rows":5,"cols":5,"stop_points":5}}}"#,
    )
    .unwrap();

    let book = OddsBook::load_from(&path).unwrap();
    assert_eq!(book.house_edge().value(), 0.9);
    assert_eq!(book.max_step("5x5").unwrap(), 19);
    assert!((book.step_probability("5x5", 1).unwrap() - 0.8).abs() < 1e-12);
    assert!((book.multiplier_for_step("5x5", 1).unwrap() - 1.125).abs() < 1e-12);
    assert!(book.step_probability("3x3", 1).is_err());
}

#[test]
fn test_sharded_end_balance_never_exceeds_peak() {
    let params = RunParams {
        rounds: 4_000,
        start_balance: 100.0,
        bet: 1.0,
        target_step: 1,
    };
    let edge = HouseEdge::new(1.0).unwrap();
    for seed in 0..8 {
        let summary = run_sharded(&params, &small(), edge, seed, 4, &CancelToken::new()).unwrap();
        assert!(
            summary.end_balance <= summary.peak_balance,
            "seed {seed}: end {} above peak {}",
            summary.end_balance,
            summary.peak_balance
        );
    }
}
