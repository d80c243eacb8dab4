//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Run an Iterated Prisoner's Dilemma round-robin and report the results
#[derive(Debug, Parser)]
#[command(name = "arena", version)]
pub struct Args {
    /// Number of teams to enter (prompted for when absent)
    #[arg(short = 'n', long)]
    pub players: Option<usize>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON tournament config (payoff, rounds, seed, roster)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Round-by-round text report
    #[arg(short, long, default_value = "tournament.txt")]
    pub output: PathBuf,

    /// Also write the full results as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
