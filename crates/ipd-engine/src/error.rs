//! Error types

use thiserror::Error;
use crate::payoff::PayoffMatrix;
use crate::registry::PlayerId;

/// Invalid tournament configuration, detected before any match is played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("payoffs must satisfy treat > release > punishment > severe punishment, got {0:?}")]
    PayoffOrdering(PayoffMatrix),

    #[error("payoffs must satisfy 2 * release > treat + severe punishment, got {0:?}")]
    PayoffNotIterated(PayoffMatrix),

    #[error("a payoff of magnitude {largest} over {max_rounds} rounds can overflow a match score")]
    ScoreOverflow { largest: u64, max_rounds: u32 },

    #[error("round range {min}..={max} is empty")]
    EmptyRoundRange { min: u32, max: u32 },

    #[error("matches need at least one round")]
    ZeroRounds,

    #[error("invalid config json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

/// Failure that stops a tournament before its first match
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown player {id} (registry holds {registered} strategies)")]
    UnknownPlayer { id: PlayerId, registered: usize },
}

/// Failure while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
