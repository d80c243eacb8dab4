//! Built-in strategies
//!
//! Each strategy is an independent [`Strategy`] implementation. A
//! [`StrategySpec`] names one of them plus its tuning parameters so rosters
//! can be written in config files.

use serde::{Deserialize, Serialize};
use crate::history::History;
use crate::random::SeededRng;
use crate::strategy::{MatchView, Move, Strategy, StrategyError};

/// Base strategy type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyBase {
    /// Always collude.
    Loyal,
    /// Always betray.
    Backstabber,
    /// Collude, but betray right after being the sucker.
    LoyalVengeful,
    /// Copy opponent's last move. Start with collude.
    TitForTat,
    /// Tit-for-Tat but start with betray.
    SuspiciousTitForTat,
    /// Collude until opponent betrays, then always betray.
    GrimTrigger,
    /// Win-stay, lose-switch.
    Pavlov,
    /// Betray only if opponent betrayed twice in a row.
    TitForTwoTats,
    /// Retaliate with increasing betrayal streaks, then forgive.
    Gradual,
    /// Random choice each round.
    Random,
}

impl StrategyBase {
    pub const ALL: [StrategyBase; 10] = [
        StrategyBase::Loyal,
        StrategyBase::Backstabber,
        StrategyBase::LoyalVengeful,
        StrategyBase::TitForTat,
        StrategyBase::SuspiciousTitForTat,
        StrategyBase::GrimTrigger,
        StrategyBase::Pavlov,
        StrategyBase::TitForTwoTats,
        StrategyBase::Gradual,
        StrategyBase::Random,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StrategyBase::Loyal => "Loyal",
            StrategyBase::Backstabber => "Backstabber",
            StrategyBase::LoyalVengeful => "Loyal Vengeful",
            StrategyBase::TitForTat => "Tit for Tat",
            StrategyBase::SuspiciousTitForTat => "Suspicious Tit for Tat",
            StrategyBase::GrimTrigger => "Grim Trigger",
            StrategyBase::Pavlov => "Pavlov",
            StrategyBase::TitForTwoTats => "Tit for Two Tats",
            StrategyBase::Gradual => "Gradual",
            StrategyBase::Random => "Random",
        }
    }
}

/// Strategy parameters for fine-tuning behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Percentage chance to collude after opponent betrays (0-100)
    pub forgiveness: u8,
    /// Number of betrayals to ignore before Grim Trigger fires
    pub noise_tolerance: u8,
    /// Bias toward collusion for Random strategy (0-100)
    pub collude_bias: u8,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            forgiveness: 0,
            noise_tolerance: 0,
            collude_bias: 50,
        }
    }
}

/// Complete strategy with base type and parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub base: StrategyBase,
    #[serde(default)]
    pub params: StrategyParams,
}

impl StrategySpec {
    /// Create a new strategy with default parameters
    pub fn new(base: StrategyBase) -> Self {
        Self {
            base,
            params: StrategyParams::default(),
        }
    }

    /// Create with custom parameters
    pub fn with_params(base: StrategyBase, params: StrategyParams) -> Self {
        Self { base, params }
    }

    /// Instantiate the decision capability this spec names
    pub fn build(&self) -> Box<dyn Strategy> {
        let p = self.params;
        match self.base {
            StrategyBase::Loyal => Box::new(Loyal),
            StrategyBase::Backstabber => Box::new(Backstabber),
            StrategyBase::LoyalVengeful => Box::new(LoyalVengeful),
            StrategyBase::TitForTat => Box::new(TitForTat { forgiveness: p.forgiveness }),
            StrategyBase::SuspiciousTitForTat => {
                Box::new(SuspiciousTitForTat { forgiveness: p.forgiveness })
            }
            StrategyBase::GrimTrigger => Box::new(GrimTrigger { noise_tolerance: p.noise_tolerance }),
            StrategyBase::Pavlov => Box::new(Pavlov),
            StrategyBase::TitForTwoTats => Box::new(TitForTwoTats),
            StrategyBase::Gradual => Box::new(Gradual),
            StrategyBase::Random => Box::new(RandomChoice { collude_bias: p.collude_bias }),
        }
    }
}

/// Roster used when no config file names one
pub fn default_roster() -> Vec<StrategySpec> {
    StrategyBase::ALL.iter().copied().map(StrategySpec::new).collect()
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(spec: &StrategySpec) -> String {
    let base_desc = match spec.base {
        StrategyBase::Loyal => "Never betrays. Always colludes.",
        StrategyBase::Backstabber => "Never colludes. Always betrays.",
        StrategyBase::LoyalVengeful => "Colludes, but betrays right after being the sucker.",
        StrategyBase::TitForTat => "Copies opponent's last move. Starts by colluding.",
        StrategyBase::SuspiciousTitForTat => "Like Tit for Tat, but starts by betraying.",
        StrategyBase::GrimTrigger => "Colludes until betrayed, then always betrays.",
        StrategyBase::Pavlov => "Repeats move if outcome was good, switches if bad.",
        StrategyBase::TitForTwoTats => "Only retaliates after two consecutive betrayals.",
        StrategyBase::Gradual => "Retaliates with increasing severity, then forgives.",
        StrategyBase::Random => "Randomly colludes or betrays each round.",
    };

    let mut desc = base_desc.to_string();

    if spec.params.forgiveness > 0 {
        desc.push_str(&format!(" {}% chance to forgive.", spec.params.forgiveness));
    }

    if spec.params.noise_tolerance > 0 {
        desc.push_str(&format!(" Tolerates {} accidental betrayals.", spec.params.noise_tolerance));
    }

    desc
}

// ──────────────────────────── Implementations ────────────────────────────

pub struct Loyal;

impl Strategy for Loyal {
    fn name(&self) -> &str {
        StrategyBase::Loyal.display_name()
    }

    fn decide(&self, _view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(Move::Collude)
    }
}

pub struct Backstabber;

impl Strategy for Backstabber {
    fn name(&self) -> &str {
        StrategyBase::Backstabber.display_name()
    }

    fn decide(&self, _view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(Move::Betray)
    }
}

pub struct LoyalVengeful;

impl Strategy for LoyalVengeful {
    fn name(&self) -> &str {
        StrategyBase::LoyalVengeful.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        let suckered = view.own_history.last() == Some(Move::Collude)
            && view.opponent_history.last() == Some(Move::Betray);
        Ok(if suckered { Move::Betray } else { Move::Collude })
    }
}

/// Answer a betrayal, unless forgiveness wins the roll
fn retaliate(forgiveness: u8, rng: &mut SeededRng) -> Move {
    if forgiveness > 0 && rng.next_percent() < forgiveness {
        Move::Collude
    } else {
        Move::Betray
    }
}

pub struct TitForTat {
    pub forgiveness: u8,
}

impl Strategy for TitForTat {
    fn name(&self) -> &str {
        StrategyBase::TitForTat.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(match view.opponent_history.last() {
            Some(Move::Betray) => retaliate(self.forgiveness, rng),
            _ => Move::Collude,
        })
    }
}

pub struct SuspiciousTitForTat {
    pub forgiveness: u8,
}

impl Strategy for SuspiciousTitForTat {
    fn name(&self) -> &str {
        StrategyBase::SuspiciousTitForTat.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(match view.opponent_history.last() {
            None => Move::Betray,
            Some(Move::Betray) => retaliate(self.forgiveness, rng),
            Some(_) => Move::Collude,
        })
    }
}

pub struct GrimTrigger {
    pub noise_tolerance: u8,
}

impl Strategy for GrimTrigger {
    fn name(&self) -> &str {
        StrategyBase::GrimTrigger.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        let betrayals = view.opponent_history.count(Move::Betray);
        Ok(if betrayals > self.noise_tolerance as usize { Move::Betray } else { Move::Collude })
    }
}

/// Win-stay, lose-switch: a round is won when the opponent colluded
/// (release or treat), lost otherwise.
pub struct Pavlov;

impl Strategy for Pavlov {
    fn name(&self) -> &str {
        StrategyBase::Pavlov.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        let (Some(mine), Some(theirs)) = (view.own_history.last(), view.opponent_history.last()) else {
            return Ok(Move::Collude);
        };
        let won = theirs == Move::Collude;
        Ok(match (won, mine) {
            (true, Move::Betray) => Move::Betray,
            (true, _) => Move::Collude,
            (false, Move::Collude) => Move::Betray,
            (false, _) => Move::Collude,
        })
    }
}

pub struct TitForTwoTats;

impl Strategy for TitForTwoTats {
    fn name(&self) -> &str {
        StrategyBase::TitForTwoTats.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        let h = view.opponent_history;
        let twice = h.nth_back(0) == Some(Move::Betray) && h.nth_back(1) == Some(Move::Betray);
        Ok(if twice { Move::Betray } else { Move::Collude })
    }
}

/// After N opponent betrayals the player should have betrayed N(N+1)/2 times
pub struct Gradual;

impl Strategy for Gradual {
    fn name(&self) -> &str {
        StrategyBase::Gradual.display_name()
    }

    fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(gradual_move(view.own_history, view.opponent_history))
    }
}

fn gradual_move(own: &History, opponent: &History) -> Move {
    let theirs = opponent.count(Move::Betray);
    let expected = theirs * (theirs + 1) / 2;
    if own.count(Move::Betray) < expected {
        Move::Betray
    } else {
        Move::Collude
    }
}

pub struct RandomChoice {
    pub collude_bias: u8,
}

impl Strategy for RandomChoice {
    fn name(&self) -> &str {
        StrategyBase::Random.display_name()
    }

    fn decide(&self, _view: &MatchView<'_>, rng: &mut SeededRng) -> Result<Move, StrategyError> {
        Ok(if rng.next_percent() < self.collude_bias { Move::Collude } else { Move::Betray })
    }
}
