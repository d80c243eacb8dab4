//! WASM bindings for browser match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_strategy, match_count, run_match, seed_bytes, SeededRng, StrategyBase, StrategySpec};
use crate::{PayoffMatrix, RoundConfig};

fn parse_spec(json: &str) -> Result<StrategySpec, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid strategy: {}", e)))
}

/// Replay one match of a tournament run with the classic payoffs and
/// round range
///
/// # Arguments
/// * `strategy_a_json` - JSON serialized StrategySpec for player A
/// * `strategy_b_json` - JSON serialized StrategySpec for player B
/// * `seed` - Tournament seed as reported by the runner
/// * `match_index` - Index of this match in round-robin order
///
/// # Returns
/// JSON serialized MatchResult
#[wasm_bindgen]
pub fn replay_match(
    strategy_a_json: &str,
    strategy_b_json: &str,
    seed: u64,
    match_index: u32,
) -> Result<JsValue, JsError> {
    let a = parse_spec(strategy_a_json)?.build();
    let b = parse_spec(strategy_b_json)?.build();

    let mut rng = SeededRng::new(&seed_bytes(seed), match_index);
    let result = run_match(a.as_ref(), b.as_ref(), &PayoffMatrix::default(), &RoundConfig::standard(), &mut rng);

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(strategy_json: &str) -> Result<String, JsError> {
    Ok(describe_strategy(&parse_spec(strategy_json)?))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: StrategyBase,
    name: &'static str,
    description: String,
}

/// Get all built-in strategies
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyBase::ALL
        .iter()
        .map(|base| StrategyInfo {
            id: *base,
            name: base.display_name(),
            description: describe_strategy(&StrategySpec::new(*base)),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Total matches in a round-robin of `participant_count` players
#[wasm_bindgen]
pub fn get_match_count(participant_count: u32) -> u32 {
    match_count(participant_count as usize) as u32
}
