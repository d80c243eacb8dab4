//! Per-player move history within one match

use std::fmt;

use serde::{Deserialize, Serialize};
use crate::strategy::Move;

/// Ordered, append-only record of one player's moves in a match.
///
/// Index 0 is the first round, the last index the most recent one.
/// Serialized as its symbol string, e.g. `"ccb"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct History(Vec<Move>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self(Vec::with_capacity(rounds))
    }

    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent move, `None` before the first round
    pub fn last(&self) -> Option<Move> {
        self.0.last().copied()
    }

    /// Move played `n` rounds before the most recent one (`nth_back(0) == last()`)
    pub fn nth_back(&self, n: usize) -> Option<Move> {
        self.0.iter().rev().nth(n).copied()
    }

    pub fn get(&self, round: usize) -> Option<Move> {
        self.0.get(round).copied()
    }

    /// Number of rounds in which `m` was played
    pub fn count(&self, m: Move) -> usize {
        self.0.iter().filter(|x| **x == m).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.0 {
            write!(f, "{}", m.symbol())?;
        }
        Ok(())
    }
}

impl From<Vec<Move>> for History {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl From<&str> for History {
    fn from(symbols: &str) -> Self {
        Self(symbols.chars().map(Move::from_symbol).collect())
    }
}

impl From<String> for History {
    fn from(symbols: String) -> Self {
        Self::from(symbols.as_str())
    }
}

impl From<History> for String {
    fn from(history: History) -> Self {
        history.to_string()
    }
}
