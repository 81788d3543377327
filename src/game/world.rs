//! # World
//!
//! The floor grid: a fixed-size, row-major array of tiles that lives for the
//! duration of one floor and is replaced wholesale on descent.

use crate::game::{Item, Position};
use crate::{ReckoningError, ReckoningResult};
use serde::{Deserialize, Serialize};

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    /// Destructible crate. Breaking it turns the tile into floor for good.
    Box {
        durability: i32,
    },
    /// Descends to the next floor when stepped on.
    Stairs,
}

impl TileKind {
    /// Whether an entity may stand on this tile.
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Stairs)
    }

    /// Whether this tile counts toward connectivity.
    ///
    /// Boxes are not walkable, but they can always be broken, so they never
    /// seal anything off.
    pub fn is_traversable(&self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Single-character glyph used by the text renderer.
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Box { .. } => 'B',
            TileKind::Stairs => '>',
        }
    }
}

/// A grid cell, optionally bearing loot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Loot lying on the tile, revealed when a box broke here.
    pub item: Option<Item>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self { kind, item: None }
    }

    pub fn floor() -> Self {
        Self::new(TileKind::Floor)
    }
}

/// Fixed-size tile grid for one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates an all-floor grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{Grid, Position, TileKind};
    ///
    /// let grid = Grid::new(8, 8);
    /// assert_eq!(grid.kind_at(Position::new(1, 1)), Some(TileKind::Floor));
    /// assert_eq!(grid.kind_at(Position::new(8, 0)), None);
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::floor(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|index| self.tiles.get(index))
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        match self.index(pos) {
            Some(index) => self.tiles.get_mut(index),
            None => None,
        }
    }

    pub fn kind_at(&self, pos: Position) -> Option<TileKind> {
        self.get(pos).map(|tile| tile.kind)
    }

    /// Overwrites the kind of a tile, keeping any item on it.
    pub fn set_kind(&mut self, pos: Position, kind: TileKind) -> ReckoningResult<()> {
        match self.get_mut(pos) {
            Some(tile) => {
                tile.kind = kind;
                Ok(())
            }
            None => Err(ReckoningError::InvalidAction(format!(
                "position {} is outside the {}x{} grid",
                pos, self.width, self.height
            ))),
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.kind_at(pos).map(|kind| kind.is_walkable()).unwrap_or(false)
    }

    /// All in-bounds positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Number of tiles whose kind satisfies `predicate`.
    pub fn count(&self, predicate: impl Fn(&TileKind) -> bool) -> usize {
        self.tiles.iter().filter(|tile| predicate(&tile.kind)).count()
    }

    /// Converts a box into floor, optionally leaving loot on it.
    ///
    /// Returns false if the tile is not a box.
    pub fn break_box(&mut self, pos: Position, loot: Option<Item>) -> bool {
        match self.get_mut(pos) {
            Some(tile) if matches!(tile.kind, TileKind::Box { .. }) => {
                tile.kind = TileKind::Floor;
                tile.item = loot;
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the item lying on a tile.
    pub fn take_item(&mut self, pos: Position) -> Option<Item> {
        self.get_mut(pos).and_then(|tile| tile.item.take())
    }
}
