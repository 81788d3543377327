//! # Generation Module
//!
//! Procedural content generation: floor layouts, enemy rosters and loot.
//!
//! Generators never keep state between calls. They take a configuration and
//! a random source and hand back owned data for the turn machine to install.

pub mod dungeon;
pub mod encounters;
pub mod loot;

pub use dungeon::*;
pub use encounters::*;
pub use loot::*;

use crate::config::{EnemyRules, RulesConfig};
use crate::game::{Entity, Grid, Position};
use crate::utils::RandomSource;
use crate::ReckoningResult;
use serde::{Deserialize, Serialize};

/// Configuration for generating one floor.
///
/// Built from a [`RulesConfig`] for a specific depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Depth being generated, starting at 1
    pub floor: u32,
    pub width: i32,
    pub height: i32,
    pub wall_count: u32,
    pub box_count: u32,
    pub box_durability: i32,
    pub place_stairs: bool,
    /// Resampling budget for each placement
    pub max_placement_attempts: u32,
    /// Fresh layouts tried before giving up
    pub max_layout_attempts: u32,
    pub enemies: EnemyRules,
}

impl GenerationConfig {
    /// Configuration for `floor` under the given rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{GenerationConfig, RulesConfig};
    ///
    /// let config = GenerationConfig::for_floor(&RulesConfig::default(), 3);
    /// assert_eq!(config.floor, 3);
    /// assert_eq!(config.width, 8);
    /// ```
    pub fn for_floor(rules: &RulesConfig, floor: u32) -> Self {
        Self {
            floor: floor.max(1),
            width: rules.grid.width,
            height: rules.grid.height,
            wall_count: rules.grid.wall_count,
            box_count: rules.grid.box_count,
            box_durability: rules.combat.box_durability,
            place_stairs: rules.grid.place_stairs,
            max_placement_attempts: rules.grid.max_placement_attempts,
            max_layout_attempts: rules.grid.max_layout_attempts,
            enemies: rules.enemies.clone(),
        }
    }

    /// Creates a configuration for testing with an open, wall-free grid.
    pub fn for_testing(floor: u32) -> Self {
        let mut config = Self::for_floor(&RulesConfig::default(), floor);
        config.wall_count = 0;
        config
    }

    /// Number of tiles besides the entry that placements need.
    pub fn required_open_tiles(&self) -> usize {
        enemy_count(self.floor, &self.enemies)
            + self.box_count as usize
            + usize::from(self.place_stairs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_floor(&RulesConfig::default(), 1)
    }
}

/// A freshly generated floor, ready to replace the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFloor {
    pub floor: u32,
    pub grid: Grid,
    pub enemies: Vec<Entity>,
    pub entry: Position,
    pub stairs: Option<Position>,
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, allowing for consistent
/// interfaces and reproducible output from any [`RandomSource`].
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RandomSource) -> ReckoningResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ReckoningResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates floor `floor` with the standard generator.
pub fn generate_floor(
    rules: &RulesConfig,
    floor: u32,
    rng: &mut dyn RandomSource,
) -> ReckoningResult<GeneratedFloor> {
    let config = GenerationConfig::for_floor(rules, floor);
    FloorGenerator::new().generate(&config, rng)
}
