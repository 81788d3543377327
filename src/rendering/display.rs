//! # Text Display
//!
//! Plain-text rendering of a [`RenderSnapshot`] for terminals and logs.

use crate::game::{Archetype, Position};
use crate::rendering::RenderSnapshot;
use std::fmt::Write;

/// Glyph drawn for the player.
pub const PLAYER_GLYPH: char = '@';

/// Draws the grid with entities on top.
///
/// # Examples
///
/// ```
/// use void_reckoning::{render_grid, ClassArchetype, Entity, GameSession, Grid, RenderSnapshot, RulesConfig};
///
/// let rules = RulesConfig::default();
/// let player = Entity::new_player(None, ClassArchetype::Fighter);
/// let session = GameSession::in_play(&rules, player, Grid::new(3, 3), Vec::new(), 1);
/// let map = render_grid(&RenderSnapshot::capture(&session));
/// assert_eq!(map, "...\n.@.\n...\n");
/// ```
pub fn render_grid(snapshot: &RenderSnapshot) -> String {
    let grid = &snapshot.grid;
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(glyph_at(snapshot, Position::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn glyph_at(snapshot: &RenderSnapshot, pos: Position) -> char {
    if snapshot.player.position == pos {
        return PLAYER_GLYPH;
    }
    if let Some(enemy) = snapshot.enemies.iter().find(|enemy| enemy.position == pos) {
        return match enemy.archetype {
            Archetype::Enemy(kind) => kind.glyph(),
            Archetype::Player(_) => PLAYER_GLYPH,
        };
    }
    match snapshot.grid.get(pos) {
        Some(tile) if tile.item.is_some() => '*',
        Some(tile) => tile.kind.glyph(),
        None => ' ',
    }
}

/// One-line player status.
pub fn render_status(snapshot: &RenderSnapshot) -> String {
    let player = &snapshot.player;
    let stats = player.stats();
    format!(
        "Floor {} | {} Lv{} | HP {}/{} | MP {}/{} | AP {}/{} | XP {} | Gold {} | {:?}",
        snapshot.floor,
        player.name,
        player.level,
        player.hp,
        stats.max_hp,
        player.mana,
        stats.max_mana,
        player.action_points,
        stats.max_action_points,
        player.xp,
        player.gold,
        snapshot.phase
    )
}

/// Full text frame: status line, map, enemies, pack and combat log.
pub fn render_ascii(snapshot: &RenderSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&render_status(snapshot));
    out.push('\n');
    out.push_str(&render_grid(snapshot));

    for enemy in &snapshot.enemies {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "  {} at {} ({}/{} hp)",
            enemy.name, enemy.position, enemy.hp, enemy.max_hp
        );
    }
    for item in &snapshot.player.inventory {
        let _ = writeln!(
            out,
            "  [{} {}] {} {}",
            item.rarity.label(),
            item.slot.label(),
            item.name,
            item.modifiers.summary()
        );
    }
    for line in &snapshot.log {
        let _ = writeln!(out, "> {}", line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::game::{
        entity_id, ClassArchetype, EnemyKind, Entity, GameSession, Grid, Item, ItemSlot, Modifiers,
        Rarity, TileKind,
    };
    use crate::generation::spawn_enemy;

    fn snapshot() -> RenderSnapshot {
        let rules = RulesConfig::default();
        let player = Entity::new_player(Some("Ash".to_string()), ClassArchetype::Rogue);
        let wraith = spawn_enemy(
            entity_id(3, 0),
            EnemyKind::Wraith,
            3,
            Position::new(3, 0),
            &rules.enemies,
        );
        let mut grid = Grid::new(4, 3);
        grid.set_kind(Position::new(0, 0), TileKind::Wall).unwrap();
        grid.set_kind(Position::new(0, 2), TileKind::Stairs).unwrap();
        grid.set_kind(Position::new(3, 2), TileKind::Box { durability: 1 }).unwrap();
        let mut session = GameSession::in_play(&rules, player, grid, vec![wraith], 3);
        session.log.push("The void stirs.");
        RenderSnapshot::capture(&session)
    }

    #[test]
    fn test_grid_glyphs() {
        assert_eq!(render_grid(&snapshot()), "#..w\n.@..\n>..B\n");
    }

    #[test]
    fn test_full_frame() {
        let frame = render_ascii(&snapshot());
        assert!(frame.starts_with("Floor 3 | Ash Lv1 | HP 80/80"));
        assert!(frame.contains("Wraith at (3, 0)"));
        assert!(frame.ends_with("> The void stirs.\n"));
    }

    #[test]
    fn test_pack_lists_rarity_and_slot() {
        let mut snapshot = snapshot();
        snapshot.player.inventory.push(Item {
            id: entity_id(u64::MAX, 4),
            name: "Rift Shard".to_string(),
            slot: ItemSlot::Scroll,
            rarity: Rarity::Rare,
            modifiers: Modifiers {
                teleport: true,
                ..Modifiers::NONE
            },
        });

        let frame = render_ascii(&snapshot);
        assert!(frame.contains("  [RARE scroll] Rift Shard teleport\n"));
    }
}
