#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that animates or prints a recursive-backtracker maze.

mod config;
mod logging;
mod run;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use maze_carver_system_generator::initialize;

use crate::config::{Overrides, PresentationConfig};

/// Animated recursive-backtracker maze generator.
#[derive(Parser, Debug)]
#[command(name = "maze-carver", version, about, long_about = None)]
struct Args {
    /// Number of cell rows
    #[arg(long, default_value_t = 15)]
    rows: u32,

    /// Number of cell columns
    #[arg(long, default_value_t = 20)]
    cols: u32,

    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Presentation settings in TOML
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate without a window and print the maze as text
    #[arg(long)]
    headless: bool,

    /// Delay between generator steps in the window
    #[arg(long, value_name = "MS")]
    step_interval_ms: Option<u64>,

    /// How long the finished maze stays on screen; 0 waits for Esc or Q
    #[arg(long, value_name = "MS")]
    hold_ms: Option<u64>,

    /// Draw the generator's current cell in its own color
    #[arg(long)]
    highlight_current: bool,
}

/// Entry point for the Maze Carver command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let _ = logging::init();

    let config = PresentationConfig::load(args.config.as_deref())?.with_overrides(Overrides {
        step_interval_ms: args.step_interval_ms,
        hold_after_done_ms: args.hold_ms,
        highlight_current: args.highlight_current,
    });

    let generator = initialize(args.rows, args.cols, args.seed)
        .with_context(|| format!("cannot create a {}x{} maze", args.rows, args.cols))?;

    if args.headless {
        let report = run::headless(generator)?;
        ensure!(
            report.perfect,
            "generated maze is not a spanning tree (seed {})",
            report.seed
        );
        println!("{report}");
        return Ok(());
    }

    tracing::info!(seed = generator.seed(), "opening window");
    run::windowed(generator, &config)
}
