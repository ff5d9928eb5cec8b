//! Odds inspector for the configured grids.
//!
//! Usage:
//!   cargo run -- odds --grid 4x4        # per-step odds table
//!   cargo run -- grids                  # list configured grids
//!   cargo run -- target --grid 3x3 2.5  # first step paying at least 2.5x
//!   cargo run -- init-config            # write built-in grids to the config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stepwager::build_info;
use stepwager::grid::{config_path, save_registry, DEFAULT_GRID};
use stepwager::odds::step_for_target_multiplier;
use stepwager::OddsBook;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "stepwager", about = "Step-wager grid odds", disable_version_flag = true)]
struct Args {
    /// Grid config file (default: ~/.stepwager/grids.json, built-in grids if absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print probability, survival and multiplier for every practical step
    Odds {
        #[arg(short, long, default_value = DEFAULT_GRID)]
        grid: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List configured grids
    Grids,
    /// Find the first step whose multiplier reaches a target
    Target {
        #[arg(short, long, default_value = DEFAULT_GRID)]
        grid: String,
        multiplier: f64,
    },
    /// Write the built-in grid table to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.version {
        println!("stepwager {}", build_info::version_string());
        return Ok(());
    }

    let Some(cmd) = args.cmd else {
        println!("Nothing to do. Run 'stepwager --help' for usage.");
        return Ok(());
    };

    match cmd {
        Cmd::InitConfig { force } => init_config(args.config, force),
        Cmd::Odds { grid, json } => {
            print_odds(&load_book(args.config.as_deref())?, &grid, json)
        }
        Cmd::Grids => print_grids(&load_book(args.config.as_deref())?),
        Cmd::Target { grid, multiplier } => {
            let book = load_book(args.config.as_deref())?;
            let cfg = book.grid(&grid)?;
            match step_for_target_multiplier(multiplier, cfg, book.house_edge()) {
                Some(step) => println!(
                    "{grid}: step {step} pays {:.4}x",
                    book.multiplier_for_step(&grid, step)?
                ),
                None => println!(
                    "{grid}: no step up to {} reaches {multiplier}x",
                    book.max_step(&grid)?
                ),
            }
            Ok(())
        }
    }
}

fn load_book(config: Option<&Path>) -> Result<OddsBook> {
    let book = match config {
        Some(path) => OddsBook::load_from(path),
        None => OddsBook::load(),
    };
    book.context("loading grid configuration")
}

fn print_grids(book: &OddsBook) -> Result<()> {
    println!("House edge: {:.2}", book.house_edge().value());
    for (id, cfg) in &book.registry().grids {
        println!(
            "  {:<6} {}x{}  {:>3} cells  {:>2} stop points  max step {}",
            id,
            cfg.rows(),
            cfg.cols(),
            cfg.total_cells(),
            cfg.stop_point_count(),
            book.max_step(id)?
        );
    }
    Ok(())
}

fn print_odds(book: &OddsBook, grid: &str, json: bool) -> Result<()> {
    let table = book.odds_table(grid)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let cfg = book.grid(grid)?;
    println!(
        "Grid {grid}: {} cells, {} stop points, house edge {:.2}",
        cfg.total_cells(),
        cfg.stop_point_count(),
        book.house_edge().value()
    );
    println!("  Step   Step Odds   Survival    Multiplier");
    println!("  ────   ─────────   ────────    ──────────");
    for row in table {
        println!(
            "  {:4}   {:8.2}%   {:7.3}%   {:9.4}x",
            row.step,
            row.probability * 100.0,
            row.survival * 100.0,
            row.multiplier
        );
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => config_path().context("locating config directory")?,
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_registry(&stepwager::GridRegistry::builtin(), &path)?;
    println!("Wrote built-in grids to {}", path.display());
    Ok(())
}
