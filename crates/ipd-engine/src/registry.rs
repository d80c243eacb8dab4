//! Player identifier → strategy lookup

use crate::catalog::StrategySpec;
use crate::error::EngineError;
use crate::strategy::Strategy;

/// Index into a [`StrategyRegistry`], stable for one tournament run
pub type PlayerId = usize;

/// Strategies available to a tournament, populated once at startup
#[derive(Default)]
pub struct StrategyRegistry {
    entries: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from catalog specs, in order
    pub fn from_specs(specs: &[StrategySpec]) -> Self {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec.build());
        }
        registry
    }

    /// Add a strategy and return the identifier assigned to it
    pub fn register(&mut self, strategy: Box<dyn Strategy>) -> PlayerId {
        self.entries.push(strategy);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Result<&dyn Strategy, EngineError> {
        self.entries
            .get(id)
            .map(|s| s.as_ref())
            .ok_or(EngineError::UnknownPlayer { id, registered: self.entries.len() })
    }

    /// Identifiers of the first `n` registered strategies
    pub fn first(&self, n: usize) -> Vec<PlayerId> {
        (0..n.min(self.entries.len())).collect()
    }
}
