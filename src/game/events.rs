//! # Events
//!
//! Notifications the turn machine emits for collaborators: renderers,
//! narration and persistence. Nothing in the simulation waits on them.

use crate::game::{EntityId, EquipSlot, LevelUpReward, Position};
use serde::{Deserialize, Serialize};

/// Which side acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Structured prompt for the flavor-text service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrationRequest {
    Combat {
        attacker: String,
        target: String,
        action: String,
        damage: i32,
    },
    Eulogy {
        floor: u32,
    },
    Room {
        floor: u32,
    },
}

/// Something that happened in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AttackResolved {
        side: Side,
        attacker: String,
        target: String,
        roll: i32,
        hit: bool,
        damage: i32,
    },
    /// Impact effect for the renderer.
    VisualEffect {
        position: Position,
        hit: bool,
        side: Side,
    },
    NarrationRequested(NarrationRequest),
    EnemyDefeated {
        id: EntityId,
        name: String,
        xp: u32,
        gold: u32,
    },
    BoxDestroyed {
        position: Position,
        loot: Option<String>,
    },
    PlayerMoved {
        from: Position,
        to: Position,
    },
    EnemyMoved {
        id: EntityId,
        from: Position,
        to: Position,
    },
    Teleported {
        from: Position,
        to: Position,
    },
    ItemPickedUp {
        name: String,
    },
    ItemEquipped {
        name: String,
        slot: EquipSlot,
    },
    ItemUnequipped {
        name: String,
        slot: EquipSlot,
    },
    ItemConsumed {
        name: String,
    },
    SpellCast {
        name: String,
        target: Position,
    },
    LevelUpReady {
        level: u32,
    },
    LevelGained {
        level: u32,
        reward: LevelUpReward,
    },
    UpgradeOffered {
        skills: Vec<String>,
    },
    SkillLearned {
        name: String,
    },
    FloorAdvanced {
        floor: u32,
    },
    TurnEnded {
        turn: u64,
    },
    /// The run is over. Carries what the eulogy and leaderboard need.
    PlayerDefeated {
        floor: u32,
        score: u32,
    },
}
