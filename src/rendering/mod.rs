//! # Rendering Module
//!
//! Read-only views of a session for front ends. A renderer gets a
//! [`RenderSnapshot`] once per frame and never touches the live session.

pub mod display;

pub use display::*;

use crate::game::{Entity, GameSession, Grid, TurnPhase};
use serde::{Deserialize, Serialize};

/// Frame-sized copy of everything a renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub grid: Grid,
    pub floor: u32,
    pub turn: u64,
    pub phase: TurnPhase,
    /// Oldest first
    pub log: Vec<String>,
    pub score: u32,
}

impl RenderSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            player: session.player.clone(),
            enemies: session.enemies.clone(),
            grid: session.grid.clone(),
            floor: session.floor,
            turn: session.turn,
            phase: session.phase,
            log: session.log.entries().map(str::to_string).collect(),
            score: session.score(),
        }
    }
}
