//! # Grid Search
//!
//! Reachability and single-step movement helpers over a [`Grid`].

use crate::game::{Direction, Grid, Position};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Returns every tile reachable from `start` through non-wall tiles.
///
/// Boxes count as passable since the player can always break them. An
/// out-of-bounds or walled start yields an empty set.
pub fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
    let start_open = grid
        .get(start)
        .map(|tile| tile.kind.is_traversable())
        .unwrap_or(false);
    if !start_open {
        return HashSet::new();
    }

    bfs_reach(start, |pos: &Position| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| {
                grid.get(*next)
                    .map(|tile| tile.kind.is_traversable())
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Direction of one greedy step from `from` toward `to`.
///
/// Moves along the axis of greatest displacement, preferring the horizontal
/// axis on ties. Returns `None` when the positions coincide.
///
/// # Examples
///
/// ```
/// use void_reckoning::{greedy_direction, Direction, Position};
///
/// let step = greedy_direction(Position::new(0, 0), Position::new(1, 4));
/// assert_eq!(step, Some(Direction::South));
/// ```
pub fn greedy_direction(from: Position, to: Position) -> Option<Direction> {
    let delta = to - from;
    if delta.x == 0 && delta.y == 0 {
        return None;
    }

    let step = if delta.x.abs() >= delta.y.abs() {
        Position::new(delta.x.signum(), 0)
    } else {
        Position::new(0, delta.y.signum())
    };
    Direction::from_delta(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TileKind;

    #[test]
    fn test_reachable_open_grid() {
        let grid = Grid::new(4, 3);
        let reach = reachable_from(&grid, Position::new(1, 1));
        assert_eq!(reach.len(), 12);
    }

    #[test]
    fn test_reachable_stops_at_walls() {
        let mut grid = Grid::new(5, 5);
        // Wall off the right-hand column.
        for y in 0..5 {
            grid.set_kind(Position::new(3, y), TileKind::Wall).unwrap();
        }
        grid.set_kind(Position::new(2, 2), TileKind::Box { durability: 1 })
            .unwrap();

        let reach = reachable_from(&grid, Position::new(1, 1));
        assert!(reach.contains(&Position::new(2, 2)));
        assert!(!reach.contains(&Position::new(4, 4)));
        assert_eq!(reach.len(), 15);
    }

    #[test]
    fn test_reachable_from_wall_is_empty() {
        let mut grid = Grid::new(3, 3);
        grid.set_kind(Position::new(1, 1), TileKind::Wall).unwrap();
        assert!(reachable_from(&grid, Position::new(1, 1)).is_empty());
        assert!(reachable_from(&grid, Position::new(9, 9)).is_empty());
    }

    #[test]
    fn test_greedy_direction_axes() {
        let origin = Position::new(3, 3);
        assert_eq!(greedy_direction(origin, Position::new(6, 4)), Some(Direction::East));
        assert_eq!(greedy_direction(origin, Position::new(1, 3)), Some(Direction::West));
        assert_eq!(greedy_direction(origin, Position::new(3, 0)), Some(Direction::North));
        assert_eq!(greedy_direction(origin, Position::new(5, 5)), Some(Direction::East));
        assert_eq!(greedy_direction(origin, origin), None);
    }
}
