//! # Void Reckoning
//!
//! A turn-based tactical dungeon-crawler simulation engine.
//!
//! ## Architecture Overview
//!
//! A player-controlled entity and AI-controlled enemies share a small grid,
//! alternate turns and resolve combat, looting, levelling and floor
//! progression under seeded dice. The crate is organised around a few pieces:
//!
//! - **Turn Machine** ([`TurnMachine`]): owns the [`GameSession`] and is the only
//!   writer of it. Transitions are pure; delays are data on [`TurnPhase`].
//! - **Generation** ([`FloorGenerator`]): floors, boxes, stairs and enemy rosters.
//! - **Combat** ([`resolve_attack`]): d20 to-hit against armor class, then damage.
//! - **Derived Stats** ([`compute_effective`]): base stats plus equipment and skills.
//! - **Narration** ([`Narrator`]): best-effort flavor text with hardcoded fallbacks.
//! - **Driver** ([`SessionDriver`]): the async scheduler that sleeps through timed
//!   phases and dispatches narration without ever blocking the simulation.
//!
//! Renderers consume [`RenderSnapshot`]s; input arrives as [`PlayerInput`].

pub mod config;
pub mod driver;
pub mod game;
pub mod generation;
pub mod input;
pub mod lldm;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use config::*;
pub use driver::*;
pub use game::*;
pub use generation::*;
pub use input::*;
pub use lldm::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the simulation engine.
#[derive(thiserror::Error, Debug)]
pub enum ReckoningError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Placement resampling ran out of attempts; the grid is too small for the roster
    #[error("Could not place {what} after {attempts} attempts")]
    PlacementExhausted { what: &'static str, attempts: u32 },

    /// Narration service failed or returned nothing usable
    #[error("Narration error: {0}")]
    Narration(String),

    /// Ruleset is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type used throughout the codebase.
pub type ReckoningResult<T> = Result<T, ReckoningError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
