//! Round-robin engine for the Iterated Prisoner's Dilemma
//!
//! Every pair of registered strategies plays one match of 100 to 200
//! rounds; per-round averages are tabulated and handed to a reporter.
//! This crate is compiled to:
//! - Native (for the `arena` command-line runner)
//! - WASM (for browser match replay, feature `wasm`)

mod catalog;
mod config;
mod error;
mod game;
mod history;
mod payoff;
mod random;
mod registry;
mod report;
mod strategy;
mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{default_roster, describe_strategy, StrategyBase, StrategyParams, StrategySpec};
pub use config::TournamentConfig;
pub use error::{ConfigError, EngineError, ReportError};
pub use game::{play_rounds, run_match, MatchResult, RoundConfig};
pub use history::History;
pub use payoff::PayoffMatrix;
pub use random::{seed_bytes, SeededRng};
pub use registry::{PlayerId, StrategyRegistry};
pub use report::{JsonReport, Reporter, SummaryTable, TextReport};
pub use strategy::{MatchView, Move, Strategy, StrategyError};
pub use tournament::{match_count, round_robin_pairs, run_tournament, Standing, TournamentState};
