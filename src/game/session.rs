//! # Session
//!
//! The complete state of one run. [`crate::TurnMachine`] owns the session and
//! is its only writer; everyone else reads it through `&GameSession` or a
//! [`crate::RenderSnapshot`].

use crate::config::RulesConfig;
use crate::game::{
    entity_id, new_run_id, ClassArchetype, Entity, EntityId, GameEvent, Grid, ItemId,
    LeaderboardEntry, Position, Side, Skill, TurnPhase, ITEM_NAMESPACE,
};
use crate::{ReckoningError, ReckoningResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Run statistics for the end screen and leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of enemies defeated
    pub enemies_defeated: u32,
    /// Total damage the player dealt
    pub damage_dealt: u64,
    /// Total damage the player took
    pub damage_taken: u64,
    /// Boxes broken open
    pub boxes_broken: u32,
    /// Items picked up off the floor
    pub items_collected: u32,
    /// Tiles walked
    pub steps_taken: u64,
    /// Completed player-and-enemy rounds
    pub turns_completed: u64,
    /// Deepest floor reached
    pub deepest_floor: u32,
}

impl GameStatistics {
    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::AttackResolved { side, damage, .. } => match side {
                Side::Player => self.damage_dealt += *damage as u64,
                Side::Enemy => self.damage_taken += *damage as u64,
            },
            GameEvent::EnemyDefeated { .. } => {
                self.enemies_defeated += 1;
            }
            GameEvent::BoxDestroyed { .. } => {
                self.boxes_broken += 1;
            }
            GameEvent::ItemPickedUp { .. } => {
                self.items_collected += 1;
            }
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::TurnEnded { .. } => {
                self.turns_completed += 1;
            }
            GameEvent::FloorAdvanced { floor } => {
                self.deepest_floor = self.deepest_floor.max(*floor);
            }
            _ => {}
        }
    }
}

/// Bounded log of the most recent messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    capacity: usize,
    entries: VecDeque<String>,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Appends a line, dropping the oldest once full.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// Identifies the run on the leaderboard
    pub run_id: Uuid,
    pub player: Entity,
    /// Surviving enemies in the order they act
    pub enemies: Vec<Entity>,
    pub grid: Grid,
    /// Current depth; 0 until a class is chosen
    pub floor: u32,
    pub turn: u64,
    pub phase: TurnPhase,
    pub log: CombatLog,
    pub statistics: GameStatistics,
    /// Skills on offer while in the upgrade phase
    pub upgrade_offers: Vec<Skill>,
    next_item_serial: u64,
}

impl GameSession {
    /// A session sitting at the start menu.
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            run_id: new_run_id(),
            player: Entity::new_player(None, ClassArchetype::Fighter),
            enemies: Vec::new(),
            grid: Grid::new(rules.grid.width, rules.grid.height),
            floor: 0,
            turn: 0,
            phase: TurnPhase::StartMenu,
            log: CombatLog::new(rules.log_capacity),
            statistics: GameStatistics::default(),
            upgrade_offers: Vec::new(),
            next_item_serial: 0,
        }
    }

    /// A session already in play, built from explicit parts.
    ///
    /// Used to resume saved runs and to stage specific board positions.
    pub fn in_play(
        rules: &RulesConfig,
        player: Entity,
        grid: Grid,
        enemies: Vec<Entity>,
        floor: u32,
    ) -> Self {
        let mut session = Self::new(rules);
        session.player = player;
        session.grid = grid;
        session.enemies = enemies;
        session.floor = floor;
        session.statistics.deepest_floor = floor;
        session.phase = TurnPhase::PlayerTurn;
        session
    }

    /// Mints a fresh item id, unique within the run.
    pub fn mint_item_id(&mut self) -> ItemId {
        self.next_item_serial += 1;
        entity_id(ITEM_NAMESPACE, self.next_item_serial)
    }

    pub fn enemy_index_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.position == pos)
    }

    pub fn enemy_index(&self, id: EntityId) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.id == id)
    }

    /// Whether any entity stands on `pos`.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.player.position == pos || self.enemy_index_at(pos).is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Final score: gold, xp, depth and kills.
    pub fn score(&self) -> u32 {
        self.player.gold
            + self.player.xp
            + 100 * self.floor.saturating_sub(1)
            + 10 * self.statistics.enemies_defeated
    }

    /// Leaderboard record for this run.
    pub fn leaderboard_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry {
            run_id: self.run_id,
            name: self.player.name.clone(),
            class: self.player.class().unwrap_or(ClassArchetype::Deprived),
            floor: self.floor,
            score: self.score(),
        }
    }

    /// Saves the session to JSON.
    pub fn save_to_json(&self) -> ReckoningResult<String> {
        serde_json::to_string_pretty(self).map_err(ReckoningError::from)
    }

    /// Loads a session from JSON.
    pub fn load_from_json(json: &str) -> ReckoningResult<Self> {
        serde_json::from_str(json).map_err(ReckoningError::from)
    }
}
