//! Match execution engine

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::history::History;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::strategy::{MatchView, Move, Strategy};

/// Result of a complete match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub history_a: History,
    pub history_b: History,
    pub score_a: i64,
    pub score_b: i64,
}

impl MatchResult {
    pub fn round_count(&self) -> usize {
        self.history_a.len()
    }

    /// Player A's score normalized by match length
    pub fn per_round_a(&self) -> f64 {
        per_round(self.score_a, self.round_count())
    }

    /// Player B's score normalized by match length
    pub fn per_round_b(&self) -> f64 {
        per_round(self.score_b, self.round_count())
    }
}

fn per_round(score: i64, rounds: usize) -> f64 {
    if rounds == 0 {
        0.0
    } else {
        score as f64 / rounds as f64
    }
}

/// Range the per-match round count is drawn from (inclusive)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub min_rounds: u32,
    pub max_rounds: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RoundConfig {
    /// 100 to 200 rounds, uniformly
    pub fn standard() -> Self {
        Self { min_rounds: 100, max_rounds: 200 }
    }

    /// Every match has exactly `rounds` rounds
    pub fn fixed(rounds: u32) -> Self {
        Self { min_rounds: rounds, max_rounds: rounds }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rounds > self.max_rounds {
            return Err(ConfigError::EmptyRoundRange { min: self.min_rounds, max: self.max_rounds });
        }
        if self.min_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }
}

/// Determine how many rounds this match will have
fn determine_round_count(rng: &mut SeededRng, config: &RoundConfig) -> u32 {
    rng.gen_range(config.min_rounds..=config.max_rounds)
}

/// Run a complete match between two strategies
///
/// # Arguments
/// * `strategy_a` - First player's strategy
/// * `strategy_b` - Second player's strategy
/// * `payoff` - Outcome scores
/// * `rounds` - Range the round count is drawn from
/// * `rng` - This match's random stream
pub fn run_match(
    strategy_a: &dyn Strategy,
    strategy_b: &dyn Strategy,
    payoff: &PayoffMatrix,
    rounds: &RoundConfig,
    rng: &mut SeededRng,
) -> MatchResult {
    let round_count = determine_round_count(rng, rounds);
    play_rounds(strategy_a, strategy_b, round_count, payoff, rng)
}

/// Play exactly `round_count` rounds
///
/// Both players decide from the state before the round, so B never sees
/// A's move for the same round.
pub fn play_rounds(
    strategy_a: &dyn Strategy,
    strategy_b: &dyn Strategy,
    round_count: u32,
    payoff: &PayoffMatrix,
    rng: &SeededRng,
) -> MatchResult {
    let mut history_a = History::with_capacity(round_count as usize);
    let mut history_b = History::with_capacity(round_count as usize);
    let mut score_a = 0i64;
    let mut score_b = 0i64;

    for round in 0..round_count {
        // Per-round RNG for each player so they don't affect each other
        let mut rng_a = rng.for_round(round * 2);
        let mut rng_b = rng.for_round(round * 2 + 1);

        let view_a = MatchView {
            own_history: &history_a,
            opponent_history: &history_b,
            own_score: score_a,
            opponent_score: score_b,
        };
        let view_b = MatchView {
            own_history: &history_b,
            opponent_history: &history_a,
            own_score: score_b,
            opponent_score: score_a,
        };
        let move_a = decide_or_invalid(strategy_a, &view_a, &mut rng_a);
        let move_b = decide_or_invalid(strategy_b, &view_b, &mut rng_b);

        let (delta_a, delta_b) = payoff.resolve(move_a, move_b);
        score_a += delta_a;
        score_b += delta_b;

        history_a.push(move_a);
        history_b.push(move_b);
    }

    MatchResult { history_a, history_b, score_a, score_b }
}

/// A failing strategy forfeits the round's score instead of aborting the run
fn decide_or_invalid(strategy: &dyn Strategy, view: &MatchView<'_>, rng: &mut SeededRng) -> Move {
    match strategy.decide(view, rng) {
        Ok(m) if m.is_valid() => m,
        Ok(_) => {
            debug!("{} returned an invalid move in round {}", strategy.name(), view.round());
            Move::Invalid
        }
        Err(e) => {
            warn!("{} failed in round {}: {}", strategy.name(), view.round(), e);
            Move::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StrategyBase, StrategySpec};
    use crate::strategy::{Strategy, StrategyError};
    use proptest::prelude::*;

    fn build(base: StrategyBase) -> Box<dyn Strategy> {
        StrategySpec::new(base).build()
    }

    fn rng(match_index: u32) -> SeededRng {
        SeededRng::new(&[42u8; 32], match_index)
    }

    struct Faulty;

    impl Strategy for Faulty {
        fn name(&self) -> &str {
            "Faulty"
        }

        fn decide(&self, _view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
            Err(StrategyError("boom".to_string()))
        }
    }

    /// Answers with its opponent's last move
    struct Mirror;

    impl Strategy for Mirror {
        fn name(&self) -> &str {
            "Mirror"
        }

        fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
            assert_eq!(view.own_history.len(), view.opponent_history.len());
            Ok(view.opponent_history.last().unwrap_or(Move::Collude))
        }
    }

    /// Betrays while behind, and checks the scores it is shown against
    /// what the histories so far imply
    struct Sore {
        payoff: PayoffMatrix,
    }

    impl Strategy for Sore {
        fn name(&self) -> &str {
            "Sore"
        }

        fn decide(&self, view: &MatchView<'_>, _rng: &mut SeededRng) -> Result<Move, StrategyError> {
            let (mut own, mut opponent) = (0, 0);
            for (mine, theirs) in view.own_history.iter().zip(view.opponent_history.iter()) {
                let (d_own, d_opponent) = self.payoff.resolve(mine, theirs);
                own += d_own;
                opponent += d_opponent;
            }
            assert_eq!((view.own_score, view.opponent_score), (own, opponent), "round {}", view.round());

            if view.own_score < view.opponent_score {
                Ok(Move::Betray)
            } else {
                Ok(Move::Collude)
            }
        }
    }

    #[test]
    fn test_views_carry_scores_before_the_round() {
        let payoff = PayoffMatrix::default();
        let sore = Sore { payoff };
        let opener = build(StrategyBase::SuspiciousTitForTat);

        // Sore in seat A: suckered, levels the score, suckered again
        let result = play_rounds(&sore, opener.as_ref(), 4, &payoff, &rng(0));
        assert_eq!(result.history_a.to_string(), "cbcb");
        assert_eq!(result.history_b.to_string(), "bcbc");
        assert_eq!((result.score_a, result.score_b), (-800, -800));

        // Same match from seat B
        let result = play_rounds(opener.as_ref(), &sore, 4, &payoff, &rng(0));
        assert_eq!(result.history_a.to_string(), "bcbc");
        assert_eq!(result.history_b.to_string(), "cbcb");
        assert_eq!((result.score_a, result.score_b), (-800, -800));
    }

    #[test]
    fn test_round_count_in_range() {
        let config = RoundConfig::standard();
        for match_index in 0..200 {
            let count = determine_round_count(&mut rng(match_index), &config);
            assert!((100..=200).contains(&count), "Round count {} out of [100,200]", count);
        }
    }

    #[test]
    fn test_round_count_distribution() {
        let config = RoundConfig::standard();
        let samples = 1000;
        let total: u32 = (0..samples).map(|i| determine_round_count(&mut rng(i), &config)).sum();
        let average = total as f64 / samples as f64;
        assert!(average > 140.0 && average < 160.0, "Average {} not ~150", average);
    }

    #[test]
    fn test_fixed_round_count() {
        let a = build(StrategyBase::Loyal);
        let b = build(StrategyBase::Loyal);
        let result = run_match(a.as_ref(), b.as_ref(), &PayoffMatrix::default(), &RoundConfig::fixed(7), &mut rng(0));
        assert_eq!(result.round_count(), 7);
    }

    #[test]
    fn test_collude_vs_collude_three_rounds() {
        let a = build(StrategyBase::Loyal);
        let b = build(StrategyBase::Loyal);
        let result = play_rounds(a.as_ref(), b.as_ref(), 3, &PayoffMatrix::default(), &rng(0));
        assert_eq!(result.history_a.to_string(), "ccc");
        assert_eq!(result.history_b.to_string(), "ccc");
        assert_eq!((result.score_a, result.score_b), (0, 0));
    }

    #[test]
    fn test_collude_vs_betray_two_rounds() {
        let a = build(StrategyBase::Loyal);
        let b = build(StrategyBase::Backstabber);
        let result = play_rounds(a.as_ref(), b.as_ref(), 2, &PayoffMatrix::default(), &rng(0));
        assert_eq!(result.history_a.to_string(), "cc");
        assert_eq!(result.history_b.to_string(), "bb");
        assert_eq!(result.score_a, -1000);
        assert_eq!(result.score_b, 200);
    }

    #[test]
    fn test_betray_vs_betray_one_round() {
        let a = build(StrategyBase::Backstabber);
        let b = build(StrategyBase::Backstabber);
        let result = play_rounds(a.as_ref(), b.as_ref(), 1, &PayoffMatrix::default(), &rng(0));
        assert_eq!((result.score_a, result.score_b), (-250, -250));
        assert_eq!(result.per_round_a(), -250.0);
    }

    #[test]
    fn test_faulty_strategy_records_invalid() {
        let a = Faulty;
        let b = build(StrategyBase::Backstabber);
        let result = play_rounds(&a, b.as_ref(), 5, &PayoffMatrix::default(), &rng(0));
        assert_eq!(result.history_a.to_string(), "?????");
        assert_eq!(result.history_b.to_string(), "bbbbb");
        assert_eq!((result.score_a, result.score_b), (0, 0));
    }

    #[test]
    fn test_moves_are_simultaneous() {
        // Mirror copies the opponent's previous move, so against Backstabber
        // the first round must still be a collusion.
        let a = Mirror;
        let b = build(StrategyBase::Backstabber);
        let result = play_rounds(&a, b.as_ref(), 3, &PayoffMatrix::default(), &rng(0));
        assert_eq!(result.history_a.to_string(), "cbb");

        let result = play_rounds(b.as_ref(), &a, 3, &PayoffMatrix::default(), &rng(0));
        assert_eq!(result.history_b.to_string(), "cbb");
    }

    #[test]
    fn test_tft_vs_backstabber() {
        let a = build(StrategyBase::TitForTat);
        let b = build(StrategyBase::Backstabber);
        let result = run_match(a.as_ref(), b.as_ref(), &PayoffMatrix::default(), &RoundConfig::standard(), &mut rng(0));
        let rounds = result.round_count() as i64;
        assert_eq!(result.history_a.get(0), Some(Move::Collude));
        assert!(result.history_a.iter().skip(1).all(|m| m == Move::Betray));
        assert_eq!(result.score_a, -500 + (rounds - 1) * -250);
        assert_eq!(result.score_b, 100 + (rounds - 1) * -250);
    }

    #[test]
    fn test_match_determinism() {
        let a = build(StrategyBase::TitForTat);
        let b = build(StrategyBase::Random);
        let payoff = PayoffMatrix::default();
        let rounds = RoundConfig::standard();

        let r1 = run_match(a.as_ref(), b.as_ref(), &payoff, &rounds, &mut rng(0));
        let r2 = run_match(a.as_ref(), b.as_ref(), &payoff, &rounds, &mut rng(0));
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_different_matches_differ() {
        let a = build(StrategyBase::Random);
        let b = build(StrategyBase::Random);
        let payoff = PayoffMatrix::default();
        let rounds = RoundConfig::standard();

        let r1 = run_match(a.as_ref(), b.as_ref(), &payoff, &rounds, &mut rng(0));
        let r2 = run_match(a.as_ref(), b.as_ref(), &payoff, &rounds, &mut rng(1));
        assert_ne!(r1.history_a, r2.history_a);
    }

    #[test]
    fn test_round_config_validation() {
        assert!(RoundConfig::standard().validate().is_ok());
        assert_eq!(
            RoundConfig { min_rounds: 5, max_rounds: 4 }.validate(),
            Err(ConfigError::EmptyRoundRange { min: 5, max: 4 })
        );
        assert_eq!(RoundConfig::fixed(0).validate(), Err(ConfigError::ZeroRounds));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_histories_match_round_count(match_index in 0u32..10_000) {
            let a = build(StrategyBase::Random);
            let b = build(StrategyBase::Pavlov);
            let result = run_match(
                a.as_ref(),
                b.as_ref(),
                &PayoffMatrix::default(),
                &RoundConfig::standard(),
                &mut rng(match_index),
            );
            prop_assert_eq!(result.history_a.len(), result.history_b.len());
            prop_assert!((100..=200).contains(&result.round_count()));
        }

        #[test]
        fn prop_scores_are_sum_of_round_payoffs(match_index in 0u32..10_000) {
            let a = build(StrategyBase::Random);
            let b = build(StrategyBase::Gradual);
            let payoff = PayoffMatrix::default();
            let result = run_match(a.as_ref(), b.as_ref(), &payoff, &RoundConfig::fixed(20), &mut rng(match_index));
            let (mut sa, mut sb) = (0, 0);
            for (ma, mb) in result.history_a.iter().zip(result.history_b.iter()) {
                let (da, db) = payoff.resolve(ma, mb);
                sa += da;
                sb += db;
            }
            prop_assert_eq!((sa, sb), (result.score_a, result.score_b));
        }
    }
}
