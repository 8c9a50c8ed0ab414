//! # Generation Module
//!
//! Backtracking assembly of room templates into a connected map.
//!
//! The search grows a tree of rooms outward from the start room. Every open
//! door is a branch point; each branch tries the catalog rooms that can fill
//! the door's matching slot, recursing until the unique target room can close
//! the map. Per-branch state is copied, so a failed branch is undone simply by
//! dropping it. Finalized placements are reported to a [`PlacementSink`].

pub mod dungeon;
pub mod emitter;
pub mod frontier;
pub mod layout;
pub mod ordering;
pub mod search;

pub use dungeon::*;
pub use emitter::*;
pub use frontier::*;
pub use layout::*;
pub use ordering::*;
pub use search::*;

use crate::{config, Bounds, Position, RoomweaveError, RoomweaveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one generation run.
///
/// Read at the start of every run; changing it between runs is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Room count (start room included) a closed layout must reach
    pub max_size: u32,
    /// Global budget of recursive attempts before the run is abandoned
    pub threshold: u32,
    /// Symmetric coordinate limit of the playable area
    pub bound: i32,
    /// Cell where the start room is placed
    pub start: Position,
    /// Only let the target close the map when no other door is left open
    pub strict_target_closure: bool,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomweave::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_size: config::DEFAULT_MAX_SIZE,
            threshold: config::DEFAULT_THRESHOLD,
            bound: config::DEFAULT_BOUND,
            start: Position::origin(),
            strict_target_closure: false,
        }
    }

    /// Creates a configuration for testing with small, quick layouts.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            max_size: 3,
            threshold: 500,
            bound: 6,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration for larger maps with a generous budget.
    pub fn for_large_maps(seed: u64) -> Self {
        Self {
            max_size: 12,
            threshold: 20_000,
            bound: 20,
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> RoomweaveResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Deepest recursion a search under this configuration can reach.
    ///
    /// Every nested attempt spends one iteration and claims at least one new
    /// cell, so depth is capped by both the budget and the playable area.
    pub fn max_search_depth(&self) -> u64 {
        let side = 2 * u64::from(self.bound.max(0).unsigned_abs()) + 1;
        (u64::from(self.threshold) + 1).min(side * side)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.bound)
    }

    /// Rejects configurations no search could satisfy.
    pub fn validate(&self) -> RoomweaveResult<()> {
        if self.max_size < 2 {
            return Err(RoomweaveError::InvalidConfig(format!(
                "max_size must be at least 2 (start and target), got {}",
                self.max_size
            )));
        }

        if self.threshold == 0 {
            return Err(RoomweaveError::InvalidConfig(
                "threshold must be at least 1".to_string(),
            ));
        }

        if self.bound < 0 {
            return Err(RoomweaveError::InvalidConfig(format!(
                "bound must not be negative, got {}",
                self.bound
            )));
        }

        if self.bound > config::MAX_BOUND {
            return Err(RoomweaveError::InvalidConfig(format!(
                "bound must not exceed {}, got {}",
                config::MAX_BOUND,
                self.bound
            )));
        }

        if self.max_search_depth() > config::MAX_SEARCH_DEPTH {
            return Err(RoomweaveError::InvalidConfig(format!(
                "threshold {} and bound {} allow a search {} rooms deep, more than {}",
                self.threshold,
                self.bound,
                self.max_search_depth(),
                config::MAX_SEARCH_DEPTH
            )));
        }

        if !self.bounds().contains(self.start) {
            return Err(RoomweaveError::InvalidConfig(format!(
                "start {} lies outside bound {}",
                self.start, self.bound
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// Gives a pure `config + rng -> content` interface over the stateful
/// [`DungeonGenerator`].
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> RoomweaveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> RoomweaveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
