//! Round-robin scheduling and score aggregation

use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::config::TournamentConfig;
use crate::error::EngineError;
use crate::game::{run_match, MatchResult};
use crate::history::History;
use crate::random::{seed_bytes, SeededRng};
use crate::registry::{PlayerId, StrategyRegistry};
use crate::strategy::Strategy;

/// Number of matches in a round-robin of `n` players: C(n,2)
pub fn match_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Every unordered pair of positions exactly once, as `(i, j)` with `j < i`
pub fn round_robin_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(|i| (0..i).map(move |j| (i, j)))
}

/// Aggregated outcome of a tournament
///
/// Tables are indexed by position in `players`, not by registry id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub players: Vec<PlayerId>,
    pub names: Vec<String>,
    /// `results[i][j]`: score per round earned by `i` against `j`
    pub results: Vec<Vec<f64>>,
    /// `moves[i][j]`: `i`'s history in its match against `j`
    pub moves: Vec<Vec<History>>,
    /// Sum over opponents of the per-round score against that opponent
    pub totals: Vec<f64>,
    pub matches_played: usize,
    pub seed: u64,
}

/// One row of the final ranking
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    pub position: usize,
    pub player: PlayerId,
    pub name: String,
    pub total: f64,
    pub average: f64,
}

impl TournamentState {
    fn new(players: Vec<PlayerId>, names: Vec<String>, seed: u64) -> Self {
        let n = players.len();
        Self {
            players,
            names,
            results: vec![vec![0.0; n]; n],
            moves: vec![vec![History::new(); n]; n],
            totals: vec![0.0; n],
            matches_played: 0,
            seed,
        }
    }

    fn record(&mut self, i: usize, j: usize, result: MatchResult) {
        let (per_round_i, per_round_j) = (result.per_round_a(), result.per_round_b());

        self.results[i][j] = per_round_i;
        self.results[j][i] = per_round_j;

        self.totals[i] += per_round_i;
        self.totals[j] += per_round_j;

        self.moves[i][j] = result.history_a;
        self.moves[j][i] = result.history_b;

        self.matches_played += 1;
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Total divided by the number of players
    pub fn average(&self, position: usize) -> f64 {
        self.totals[position] / self.player_count() as f64
    }

    /// Players ranked by total, best first. Ties keep position order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = (0..self.player_count())
            .map(|position| Standing {
                position,
                player: self.players[position],
                name: self.names[position].clone(),
                total: self.totals[position],
                average: self.average(position),
            })
            .collect();
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }
}

/// Play every pair of `players` once and tabulate the results
///
/// All identifiers are resolved and the configuration is validated before
/// the first match, so a bad roster never leaves partial state behind.
pub fn run_tournament(
    registry: &StrategyRegistry,
    players: &[PlayerId],
    config: &TournamentConfig,
) -> Result<TournamentState, EngineError> {
    config.validate()?;
    let strategies = players
        .iter()
        .map(|id| registry.get(*id))
        .collect::<Result<Vec<&dyn Strategy>, _>>()?;
    let names = strategies.iter().map(|s| s.name().to_string()).collect();

    let seed = config.resolve_seed();
    let seed_arr = seed_bytes(seed);
    let mut state = TournamentState::new(players.to_vec(), names, seed);

    info!(
        "Tournament of {} players, {} matches, seed {}",
        players.len(),
        match_count(players.len()),
        seed
    );

    for (match_index, (i, j)) in round_robin_pairs(players.len()).enumerate() {
        let mut rng = SeededRng::new(&seed_arr, match_index as u32);
        let result = run_match(strategies[i], strategies[j], &config.payoff, &config.rounds, &mut rng);

        debug!(
            "Match {}: {} vs {} over {} rounds, {} to {}",
            match_index,
            state.names[i],
            state.names[j],
            result.round_count(),
            result.score_a,
            result.score_b
        );

        state.record(i, j, result);
    }

    info!("Tournament complete: {} matches played", state.matches_played);
    Ok(state)
}
