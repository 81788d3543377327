//! # Derived Stats
//!
//! Effective stats are never stored. They are recomputed from base stats,
//! equipped items and learned skills every time they are read, so they can
//! never go stale after an equip or an upgrade.

use crate::game::{Entity, Modifiers};
use serde::{Deserialize, Serialize};

/// Combat-relevant stats after every modifier has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub max_hp: i32,
    pub max_mana: i32,
    pub attack_bonus: i32,
    pub defense: i32,
    pub armor_class: i32,
    pub range: u32,
    pub max_action_points: u32,
    pub intelligence: i32,
}

impl EffectiveStats {
    /// Stats of something that can be hit but never fights back, like a box.
    pub fn destructible(armor_class: i32, durability: i32) -> Self {
        Self {
            max_hp: durability,
            max_mana: 0,
            attack_bonus: 0,
            defense: 0,
            armor_class,
            range: 0,
            max_action_points: 0,
            intelligence: 0,
        }
    }

    fn base(entity: &Entity) -> Self {
        Self {
            max_hp: entity.max_hp,
            max_mana: entity.max_mana,
            attack_bonus: entity.attack_bonus,
            defense: entity.defense,
            armor_class: entity.armor_class,
            range: entity.range,
            max_action_points: entity.max_action_points,
            intelligence: entity.intelligence,
        }
    }

    /// Adds one modifier bundle. Defense also hardens armor class.
    fn apply(&mut self, modifiers: &Modifiers) {
        self.max_hp += modifiers.hp;
        self.max_mana += modifiers.mana;
        self.attack_bonus += modifiers.attack;
        self.defense += modifiers.defense;
        self.armor_class += modifiers.defense;
        self.range = self.range.saturating_add_signed(modifiers.range);
        self.max_action_points = self
            .max_action_points
            .saturating_add_signed(modifiers.max_action_points);
        self.intelligence += modifiers.intelligence;
    }
}

/// Computes an entity's effective stats.
///
/// Pure: the entity is not touched, and two calls on an unchanged entity
/// return identical values.
///
/// # Examples
///
/// ```
/// use void_reckoning::{compute_effective, ClassArchetype, Entity};
///
/// let player = Entity::new_player(None, ClassArchetype::Rogue);
/// let stats = compute_effective(&player);
/// assert_eq!(stats.attack_bonus, player.attack_bonus);
/// assert_eq!(stats, compute_effective(&player));
/// ```
pub fn compute_effective(entity: &Entity) -> EffectiveStats {
    let mut stats = EffectiveStats::base(entity);
    for item in entity.equipped.iter() {
        stats.apply(&item.modifiers);
    }
    for skill in &entity.skills {
        stats.apply(&skill.modifiers);
    }
    stats.max_hp = stats.max_hp.max(1);
    stats.max_mana = stats.max_mana.max(0);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{entity_id, ClassArchetype, Item, ItemSlot, Rarity, Skill};

    fn blade() -> Item {
        Item {
            id: entity_id(7, 1),
            name: "Shattered Soul-Blade".to_string(),
            slot: ItemSlot::Weapon,
            rarity: Rarity::Common,
            modifiers: Modifiers {
                attack: 8,
                ..Modifiers::NONE
            },
        }
    }

    #[test]
    fn test_base_stats_without_modifiers() {
        let player = Entity::new_player(None, ClassArchetype::Fighter);
        let stats = compute_effective(&player);
        assert_eq!(stats.max_hp, 100);
        assert_eq!(stats.attack_bonus, 12);
        assert_eq!(stats.armor_class, 14);
        assert_eq!(stats.range, 1);
        assert_eq!(stats.max_action_points, 3);
    }

    #[test]
    fn test_equipment_and_skills_stack() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        player.equipped.weapon = Some(blade());
        player.skills.push(Skill::new(
            "iron_skin",
            "Iron Skin",
            "",
            Modifiers {
                defense: 2,
                ..Modifiers::NONE
            },
        ));
        player.skills.push(Skill::new(
            "long_reach",
            "Long Reach",
            "",
            Modifiers {
                range: 1,
                ..Modifiers::NONE
            },
        ));

        let stats = compute_effective(&player);
        assert_eq!(stats.attack_bonus, 20);
        assert_eq!(stats.defense, 8);
        assert_eq!(stats.armor_class, 16);
        assert_eq!(stats.range, 2);

        // Base stats are untouched.
        assert_eq!(player.attack_bonus, 12);
        assert_eq!(player.armor_class, 14);
    }

    #[test]
    fn test_negative_modifiers_saturate() {
        let mut player = Entity::new_player(None, ClassArchetype::Deprived);
        player.skills.push(Skill::new(
            "cursed",
            "Cursed",
            "",
            Modifiers {
                range: -5,
                max_action_points: -9,
                hp: -500,
                ..Modifiers::NONE
            },
        ));
        let stats = compute_effective(&player);
        assert_eq!(stats.range, 0);
        assert_eq!(stats.max_action_points, 0);
        assert_eq!(stats.max_hp, 1);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut player = Entity::new_player(None, ClassArchetype::Warlock);
        player.equipped.weapon = Some(blade());
        assert_eq!(compute_effective(&player), compute_effective(&player));
    }

    #[test]
    fn test_destructible_stats() {
        let stats = EffectiveStats::destructible(3, 10);
        assert_eq!(stats.armor_class, 3);
        assert_eq!(stats.max_hp, 10);
        assert_eq!(stats.attack_bonus, 0);
    }
}
