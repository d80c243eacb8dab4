//! Tournament configuration

use serde::{Deserialize, Serialize};
use crate::catalog::{default_roster, StrategySpec};
use crate::error::ConfigError;
use crate::game::RoundConfig;
use crate::payoff::PayoffMatrix;

/// Everything a run needs besides the number of players.
///
/// Every field is optional in JSON; missing fields take the classic values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub payoff: PayoffMatrix,
    pub rounds: RoundConfig,
    /// Fixed seed for a reproducible run, random when absent
    pub seed: Option<u64>,
    /// Strategies in registry order
    pub roster: Vec<StrategySpec>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            payoff: PayoffMatrix::default(),
            rounds: RoundConfig::standard(),
            seed: None,
            roster: default_roster(),
        }
    }
}

impl TournamentConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the Prisoner's Dilemma ordering, the round range, and that no
    /// match can overflow its score
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.payoff.validate()?;
        self.rounds.validate()?;
        self.payoff.check_score_range(self.rounds.max_rounds)
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
