//! # Game Module
//!
//! Core simulation types: the entity model, derived stats, combat, progression,
//! inventory handling and the turn state machine that orchestrates them.
//!
//! Everything here is deterministic given a [`crate::RandomSource`]. Timing is
//! expressed as data on [`TurnPhase`] and carried out by [`crate::SessionDriver`].

pub mod combat;
pub mod entities;
pub mod events;
pub mod inventory;
pub mod items;
pub mod leaderboard;
pub mod progression;
pub mod session;
pub mod stats;
pub mod turn;
pub mod world;

pub use combat::*;
pub use entities::*;
pub use events::*;
pub use inventory::*;
pub use items::*;
pub use leaderboard::*;
pub use progression::*;
pub use session::*;
pub use stats::*;
pub use turn::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate on the floor grid.
///
/// # Examples
///
/// ```
/// use void_reckoning::Position;
///
/// let pos = Position::new(3, 5);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 5);
///
/// let neighbours = pos.cardinal_adjacent_positions();
/// assert_eq!(neighbours.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Tile every floor is entered on.
pub const ENTRY_POSITION: Position = Position::new(1, 1);

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Steps between two tiles when moving only along the axes. Attack and
    /// spell range are measured this way.
    ///
    /// ```
    /// use void_reckoning::{Position, ENTRY_POSITION};
    ///
    /// assert_eq!(ENTRY_POSITION.manhattan_distance(Position::new(3, 2)), 3);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// The four orthogonal neighbours, which may lie off the grid.
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }

    /// Position one step away in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions. Nothing on the grid moves diagonally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a unit delta to a direction.
    ///
    /// Returns None for anything that is not a single cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::West,
            Direction::East,
            Direction::South,
        ]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Namespace of the player entity id.
pub const PLAYER_NAMESPACE: u64 = 0;

/// Namespace of minted item ids.
pub const ITEM_NAMESPACE: u64 = u64::MAX;

/// Builds a deterministic id from a namespace and a serial number.
///
/// Enemies use their floor number as namespace, so ids never repeat within a
/// run and replaying a seed reproduces them exactly.
pub fn entity_id(namespace: u64, serial: u64) -> EntityId {
    Uuid::from_u128(((namespace as u128) << 64) | serial as u128)
}

/// Creates a random id, used for run identifiers.
pub fn new_run_id() -> Uuid {
    Uuid::new_v4()
}
