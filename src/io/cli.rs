//! Command-line interface for evaluating every area of a puzzle file

use crate::algorithm::cache::SignatureCache;
use crate::algorithm::scheduler::{BatchSummary, Scheduler, SchedulerConfig};
use crate::io::error::Result;
use crate::io::input::read_puzzle;
use crate::io::progress::ProgressManager;
use crate::spatial::catalog::TileCatalog;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tilefit")]
#[command(
    author,
    version,
    about = "Decide which areas can be packed with their required polyomino tiles"
)]
/// Command-line arguments for the packing tool
pub struct Cli {
    /// Puzzle file with tile type blocks followed by area lines
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of worker threads (defaults to available cores, at most 8)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Scheduler configuration from the worker flag
    ///
    /// # Errors
    ///
    /// Returns an error if `--workers 0` was given
    pub fn scheduler_config(&self) -> Result<SchedulerConfig> {
        self.workers
            .map_or_else(|| Ok(SchedulerConfig::default()), SchedulerConfig::with_workers)
    }
}

/// Loads a puzzle, evaluates all of its areas, and tracks progress
pub struct BatchRunner {
    cli: Cli,
}

impl BatchRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Evaluate every area of the input file
    ///
    /// # Errors
    ///
    /// Returns an error if the worker count is invalid, or the input cannot
    /// be read or parsed. Failures of individual areas are reported in the
    /// summary instead.
    pub fn run(&self) -> Result<BatchSummary> {
        let config = self.cli.scheduler_config()?;
        let started = Instant::now();

        let puzzle = read_puzzle(&self.cli.input)?;
        let catalog = puzzle.catalog();
        log_catalog(&catalog);
        tracing::info!(
            input = %self.cli.input.display(),
            tile_types = catalog.len(),
            areas = puzzle.areas.len(),
            "loaded puzzle"
        );

        let tasks = puzzle.tasks();
        let mut progress = if self.cli.should_show_progress() {
            ProgressManager::new(tasks.len())
        } else {
            ProgressManager::hidden(tasks.len())
        };

        let cache = SignatureCache::new();
        let scheduler = Scheduler::new(config, &catalog, &cache);
        let summary = scheduler.run(tasks, |report| progress.record(report));
        progress.finish();

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis(),
            fit = summary.fit_count(),
            total = summary.total(),
            "finished"
        );
        Ok(summary)
    }
}

fn log_catalog(catalog: &TileCatalog) {
    for kind in catalog.kinds() {
        tracing::info!(
            tile_type = kind.index(),
            cells = kind.cell_count(),
            rotations = kind.rotations().len(),
            "tile type"
        );
    }
}
