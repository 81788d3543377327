//! # Configuration
//!
//! Default constants and the tunable [`RulesConfig`]. Every number the
//! simulation balances on lives here so a ruleset can be swapped by loading a
//! JSON file instead of editing code.

use crate::{ReckoningError, ReckoningResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default grid width in tiles
pub const DEFAULT_GRID_WIDTH: i32 = 8;

/// Default grid height in tiles
pub const DEFAULT_GRID_HEIGHT: i32 = 8;

/// Largest grid side a ruleset may ask for
pub const MAX_GRID_SIDE: i32 = 256;

/// Name given to the player when none is chosen
pub const DEFAULT_PLAYER_NAME: &str = "Soul-Seeker";

/// Number of combat log lines kept in a session
pub const DEFAULT_LOG_CAPACITY: usize = 8;

/// Layout rules for the procedural generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridRules {
    pub width: i32,
    pub height: i32,
    /// Walls scattered per floor before sealing unreachable pockets
    pub wall_count: u32,
    pub box_count: u32,
    pub place_stairs: bool,
    /// Resampling budget for each single placement
    pub max_placement_attempts: u32,
    /// Number of fresh layouts tried before generation fails
    pub max_layout_attempts: u32,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            wall_count: 6,
            box_count: 2,
            place_stairs: true,
            max_placement_attempts: 200,
            max_layout_attempts: 20,
        }
    }
}

/// Enemy roster size and per-floor scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRules {
    pub base_count: u32,
    /// One extra enemy per this many floors
    pub floors_per_extra_enemy: f64,
    pub base_hp: i32,
    pub hp_per_floor: i32,
    pub base_attack: i32,
    pub attack_per_floor: i32,
    pub base_armor_class: i32,
    pub armor_class_per_floor: i32,
    pub defense: i32,
    pub xp_reward: u32,
    pub gold_reward: u32,
    pub wraith_from_floor: u32,
    pub wraith_chance: f64,
    /// Every n-th floor ends its roster with a champion; 0 disables champions
    pub champion_every: u32,
}

impl Default for EnemyRules {
    fn default() -> Self {
        Self {
            base_count: 2,
            floors_per_extra_enemy: 1.5,
            base_hp: 40,
            hp_per_floor: 15,
            base_attack: 4,
            attack_per_floor: 1,
            base_armor_class: 8,
            armor_class_per_floor: 1,
            defense: 2,
            xp_reward: 50,
            gold_reward: 15,
            wraith_from_floor: 3,
            wraith_chance: 0.35,
            champion_every: 5,
        }
    }
}

/// Dice ranges and loot odds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    pub damage_min: i32,
    pub damage_max: i32,
    /// Probability a broken box leaves loot behind
    pub loot_drop_chance: f64,
    pub box_durability: i32,
    pub box_armor_class: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            damage_min: 8,
            damage_max: 19,
            loot_drop_chance: 0.6,
            box_durability: 1,
            box_armor_class: 0,
        }
    }
}

/// Experience and upgrade rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    /// Level-up fires when xp reaches this times the current level
    pub xp_per_level: u32,
    pub vitality_hp: i32,
    pub might_attack: i32,
    pub upgrade_offers: usize,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            vitality_hp: 40,
            might_attack: 12,
            upgrade_offers: 3,
        }
    }
}

/// Presentation delays attached to timed phases, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingRules {
    pub dm_pause_ms: u64,
    pub settle_ms: u64,
    pub ai_start_ms: u64,
    pub ai_step_ms: u64,
    pub descend_ms: u64,
    pub narration_timeout_ms: u64,
}

impl TimingRules {
    /// Zero delays everywhere except the narration timeout.
    pub fn instant() -> Self {
        Self {
            dm_pause_ms: 0,
            settle_ms: 0,
            ai_start_ms: 0,
            ai_step_ms: 0,
            descend_ms: 0,
            ..Self::default()
        }
    }

    pub fn narration_timeout(&self) -> Duration {
        Duration::from_millis(self.narration_timeout_ms)
    }
}

impl Default for TimingRules {
    fn default() -> Self {
        Self {
            dm_pause_ms: 1500,
            settle_ms: 500,
            ai_start_ms: 600,
            ai_step_ms: 400,
            descend_ms: 1000,
            narration_timeout_ms: 2500,
        }
    }
}

/// Complete tunable ruleset.
///
/// # Examples
///
/// ```
/// use void_reckoning::RulesConfig;
///
/// let rules = RulesConfig::from_json(r#"{ "combat": { "loot_drop_chance": 1.0 } }"#).unwrap();
/// assert_eq!(rules.combat.loot_drop_chance, 1.0);
/// assert_eq!(rules.grid.width, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub grid: GridRules,
    pub enemies: EnemyRules,
    pub combat: CombatRules,
    pub progression: ProgressionRules,
    pub timing: TimingRules,
    pub log_capacity: usize,
}

impl RulesConfig {
    /// Default rules with all presentation delays removed.
    pub fn instant() -> Self {
        Self {
            timing: TimingRules::instant(),
            ..Self::default()
        }
    }

    /// Parses and validates rules from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> ReckoningResult<Self> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Loads and validates rules from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ReckoningResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> ReckoningResult<String> {
        serde_json::to_string_pretty(self).map_err(ReckoningError::from)
    }

    /// Rejects rulesets the simulation cannot run with.
    pub fn validate(&self) -> ReckoningResult<()> {
        if self.grid.width < 3 || self.grid.height < 3 {
            return Err(ReckoningError::Config(format!(
                "grid must be at least 3x3, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.grid.width > MAX_GRID_SIDE || self.grid.height > MAX_GRID_SIDE {
            return Err(ReckoningError::Config(format!(
                "grid sides are capped at {}, got {}x{}",
                MAX_GRID_SIDE, self.grid.width, self.grid.height
            )));
        }
        if self.grid.max_placement_attempts == 0 || self.grid.max_layout_attempts == 0 {
            return Err(ReckoningError::Config(
                "placement and layout attempt budgets must be positive".to_string(),
            ));
        }
        if self.combat.damage_min > self.combat.damage_max {
            return Err(ReckoningError::Config(format!(
                "damage range [{}, {}] is empty",
                self.combat.damage_min, self.combat.damage_max
            )));
        }
        for (name, probability) in [
            ("loot_drop_chance", self.combat.loot_drop_chance),
            ("wraith_chance", self.enemies.wraith_chance),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ReckoningError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, probability
                )));
            }
        }
        if self.enemies.floors_per_extra_enemy <= 0.0 {
            return Err(ReckoningError::Config(
                "floors_per_extra_enemy must be positive".to_string(),
            ));
        }
        if self.progression.xp_per_level == 0 {
            return Err(ReckoningError::Config(
                "xp_per_level must be positive".to_string(),
            ));
        }
        if self.log_capacity == 0 {
            return Err(ReckoningError::Config(
                "log_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            grid: GridRules::default(),
            enemies: EnemyRules::default(),
            combat: CombatRules::default(),
            progression: ProgressionRules::default(),
            timing: TimingRules::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}
