//! Payoff matrix for the Prisoner's Dilemma

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::strategy::Move;

/// The four outcomes of a round
///
/// Must keep `T > R > P > S` to be a Prisoner's Dilemma, and `2R > T + S`
/// for the iterated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffMatrix {
    /// (R) both players collude
    pub release: i64,
    /// (T) betray a colluding partner
    pub treat: i64,
    /// (S) collude while the partner betrays
    pub severe_punishment: i64,
    /// (P) both players betray
    pub punishment: i64,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self {
            release: 0,
            treat: 100,
            severe_punishment: -500,
            punishment: -250,
        }
    }
}

impl PayoffMatrix {
    /// Score deltas (a, b) for one round. Invalid moves score nothing.
    pub fn resolve(&self, a: Move, b: Move) -> (i64, i64) {
        match (a, b) {
            (Move::Collude, Move::Collude) => (self.release, self.release),
            (Move::Collude, Move::Betray) => (self.severe_punishment, self.treat),
            (Move::Betray, Move::Collude) => (self.treat, self.severe_punishment),
            (Move::Betray, Move::Betray) => (self.punishment, self.punishment),
            (Move::Invalid, _) | (_, Move::Invalid) => (0, 0),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.treat > self.release
            && self.release > self.punishment
            && self.punishment > self.severe_punishment;
        if !ordered {
            return Err(ConfigError::PayoffOrdering(*self));
        }
        // i128 so config values near i64::MAX cannot overflow the check
        if 2 * self.release as i128 <= self.treat as i128 + self.severe_punishment as i128 {
            return Err(ConfigError::PayoffNotIterated(*self));
        }
        Ok(())
    }

    /// Largest score change a single round can cause
    pub fn largest_magnitude(&self) -> u64 {
        [self.release, self.treat, self.severe_punishment, self.punishment]
            .into_iter()
            .map(i64::unsigned_abs)
            .max()
            .unwrap_or(0)
    }

    /// A match of `max_rounds` must not be able to overflow an i64 score
    pub fn check_score_range(&self, max_rounds: u32) -> Result<(), ConfigError> {
        let largest = self.largest_magnitude();
        if largest as u128 * max_rounds as u128 > i64::MAX as u128 {
            return Err(ConfigError::ScoreOverflow { largest, max_rounds });
        }
        Ok(())
    }
}
