//! # Tile Commands
//!
//! Classifies a tile click into the one action it stands for.

use crate::game::{EntityId, GameSession, Position, TileKind};

/// What a click on a tile means right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    /// An enemy stands there, within the player's range
    Attack(EntityId),
    /// A box within range
    BreakBox(Position),
    /// An adjacent, empty, walkable tile
    Move(Position),
    Ignore,
}

/// Resolves a clicked tile against the current session.
///
/// Range is the player's effective range, measured in Manhattan distance.
///
/// # Examples
///
/// ```
/// use void_reckoning::{resolve_tile_action, ClassArchetype, Entity, GameSession, Grid, Position, RulesConfig, TileAction};
///
/// let rules = RulesConfig::default();
/// let player = Entity::new_player(None, ClassArchetype::Fighter);
/// let session = GameSession::in_play(&rules, player, Grid::new(8, 8), Vec::new(), 1);
///
/// assert_eq!(resolve_tile_action(&session, Position::new(2, 1)), TileAction::Move(Position::new(2, 1)));
/// assert_eq!(resolve_tile_action(&session, Position::new(3, 1)), TileAction::Ignore);
/// ```
pub fn resolve_tile_action(session: &GameSession, target: Position) -> TileAction {
    let player = &session.player;
    let Some(kind) = session.grid.kind_at(target) else {
        return TileAction::Ignore;
    };
    let distance = player.position.manhattan_distance(target);
    let range = player.stats().range;

    if let Some(index) = session.enemy_index_at(target) {
        if distance <= range {
            return TileAction::Attack(session.enemies[index].id);
        }
        return TileAction::Ignore;
    }

    match kind {
        TileKind::Box { .. } if distance <= range => TileAction::BreakBox(target),
        TileKind::Floor | TileKind::Stairs if distance == 1 => TileAction::Move(target),
        _ => TileAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::game::{entity_id, ClassArchetype, EnemyKind, Entity, Grid};
    use crate::generation::spawn_enemy;

    fn session_with(enemies: Vec<Entity>, class: ClassArchetype) -> GameSession {
        let rules = RulesConfig::default();
        let player = Entity::new_player(None, class);
        GameSession::in_play(&rules, player, Grid::new(8, 8), enemies, 1)
    }

    fn husk_at(x: i32, y: i32) -> Entity {
        spawn_enemy(
            entity_id(1, 0),
            EnemyKind::VoidHusk,
            1,
            Position::new(x, y),
            &RulesConfig::default().enemies,
        )
    }

    #[test]
    fn test_enemy_in_range_is_attacked() {
        let session = session_with(vec![husk_at(2, 1)], ClassArchetype::Fighter);
        assert_eq!(
            resolve_tile_action(&session, Position::new(2, 1)),
            TileAction::Attack(entity_id(1, 0))
        );
    }

    #[test]
    fn test_range_follows_class() {
        let fighter = session_with(vec![husk_at(3, 1)], ClassArchetype::Fighter);
        assert_eq!(resolve_tile_action(&fighter, Position::new(3, 1)), TileAction::Ignore);

        let warlock = session_with(vec![husk_at(3, 1)], ClassArchetype::Warlock);
        assert_eq!(
            resolve_tile_action(&warlock, Position::new(3, 1)),
            TileAction::Attack(entity_id(1, 0))
        );
    }

    #[test]
    fn test_walls_boxes_and_bounds() {
        let mut session = session_with(Vec::new(), ClassArchetype::Fighter);
        session.grid.set_kind(Position::new(1, 2), TileKind::Wall).unwrap();
        session
            .grid
            .set_kind(Position::new(2, 1), TileKind::Box { durability: 1 })
            .unwrap();

        assert_eq!(resolve_tile_action(&session, Position::new(1, 2)), TileAction::Ignore);
        assert_eq!(
            resolve_tile_action(&session, Position::new(2, 1)),
            TileAction::BreakBox(Position::new(2, 1))
        );
        assert_eq!(resolve_tile_action(&session, Position::new(-1, 1)), TileAction::Ignore);
        // Diagonals are not adjacent.
        assert_eq!(resolve_tile_action(&session, Position::new(2, 2)), TileAction::Ignore);
    }
}
