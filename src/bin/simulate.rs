//! Monte Carlo RTP simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 100k rounds on 3x3, target step 3
//!   cargo run --bin simulate -- -g 4x4 -t 8 -n 50000  # 50k rounds on 4x4, target step 8
//!   cargo run --bin simulate -- --convergence -t 5    # 1M rounds, sharded, unlimited bankroll
//!   cargo run --bin simulate -- --seed 42 --json      # Reproducible, JSON report saved
//!   cargo run --bin simulate -- --shards 8 -v         # Per-shard progress lines

use anyhow::{Context, Result};
use clap::Parser;
use stepwager::build_info;
use stepwager::grid::DEFAULT_GRID;
use stepwager::simulator::{run_batch_with_cancel, CancelToken, SimConfig};
use stepwager::OddsBook;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Monte Carlo return-to-player simulator")]
struct Args {
    /// Grid identifier
    #[arg(short, long, default_value = DEFAULT_GRID)]
    grid: String,

    /// Number of rounds
    #[arg(short = 'n', long)]
    rounds: Option<u64>,

    /// Starting balance
    #[arg(short, long)]
    balance: Option<f64>,

    /// Stake per round
    #[arg(long)]
    bet: Option<f64>,

    /// Step to cash out at
    #[arg(short, long)]
    target: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Parallel shards (each starts from the full balance)
    #[arg(long)]
    shards: Option<usize>,

    /// Stop after this many seconds and report the rounds played so far
    #[arg(long)]
    time_limit: Option<u64>,

    /// Quick check preset (10k rounds)
    #[arg(long, conflicts_with = "convergence")]
    quick: bool,

    /// Convergence preset (1M rounds, unlimited bankroll, all cores)
    #[arg(long)]
    convergence: bool,

    /// Grid config file (default: ~/.stepwager/grids.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save a JSON report next to the working directory
    #[arg(long)]
    json: bool,

    /// Per-shard progress lines; repeat (-vv) for debug logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose >= 2 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let book = match &args.config {
        Some(path) => OddsBook::load_from(path),
        None => OddsBook::load(),
    }
    .context("loading grid configuration")?;

    let config = build_config(&args);
    let run = &config.params.run;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              STEPWAGER RTP SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  Build:          {}", build_info::version_string());
    println!();
    println!("Configuration:");
    println!("  Grid:           {}", config.params.grid);
    println!("  Rounds:         {}", run.rounds);
    println!("  Start Balance:  {:.2}", run.start_balance);
    println!("  Bet:            {:.2}", run.bet);
    println!("  Target Step:    {}", run.target_step);
    if config.shards > 1 {
        println!("  Shards:         {}", config.shards);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let cancel = CancelToken::new();
    if let Some(secs) = args.time_limit {
        let timer = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            log::warn!("time limit of {secs}s reached, stopping after the current round");
            timer.cancel();
        });
    }

    let report = run_batch_with_cancel(&config, &book, &cancel)?;

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())
            .with_context(|| format!("writing {filename}"))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn build_config(args: &Args) -> SimConfig {
    let mut config = if args.convergence {
        SimConfig::convergence_check(&args.grid, args.target.unwrap_or(3))
    } else if args.quick {
        SimConfig::quick_check(&args.grid)
    } else {
        let mut config = SimConfig::default();
        config.params.grid = args.grid.clone();
        config
    };

    let run = &mut config.params.run;
    if let Some(rounds) = args.rounds {
        run.rounds = rounds;
    }
    if let Some(balance) = args.balance {
        run.start_balance = balance;
    }
    if let Some(bet) = args.bet {
        run.bet = bet;
    }
    if let Some(target) = args.target {
        run.target_step = target;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(shards) = args.shards {
        config.shards = shards;
    }
    config.verbosity = args.verbose.saturating_add(1);
    config
}
