//! Moves and the decision capability every player implements

use serde::{Deserialize, Serialize};
use crate::history::History;
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Collude,
    Betray,
    /// Malformed decision. Recorded in history, never scored.
    Invalid,
}

impl Move {
    /// Parse a move symbol. Anything but `'c'` or `'b'` is `Invalid`.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'c' => Move::Collude,
            'b' => Move::Betray,
            _ => Move::Invalid,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Move::Collude => 'c',
            Move::Betray => 'b',
            Move::Invalid => '?',
        }
    }

    pub fn is_valid(self) -> bool {
        self != Move::Invalid
    }
}

/// Everything a strategy is entitled to see when deciding a round.
///
/// Histories and scores are as they stood before the current round.
#[derive(Clone, Copy, Debug)]
pub struct MatchView<'a> {
    pub own_history: &'a History,
    pub opponent_history: &'a History,
    pub own_score: i64,
    pub opponent_score: i64,
}

impl MatchView<'_> {
    /// Zero-indexed number of the round being decided
    pub fn round(&self) -> usize {
        self.own_history.len()
    }
}

/// Failure raised by a strategy's own decision code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("strategy fault: {0}")]
pub struct StrategyError(pub String);

/// Decision capability of one player
///
/// Implementations take `&self`: one instance serves every match of a
/// tournament, so nothing can leak from one match into the next.
pub trait Strategy {
    /// Display name, queried once per player before the tournament starts
    fn name(&self) -> &str;

    /// Choose the next move. `rng` is this player's stream for this round.
    fn decide(&self, view: &MatchView<'_>, rng: &mut SeededRng) -> Result<Move, StrategyError>;
}
