//! # Entities
//!
//! The shared representation of the player and enemies. Base stats live on
//! [`Entity`]; anything combat-relevant is read through [`Entity::stats`],
//! which folds in equipment and learned skills.

use crate::config::DEFAULT_PLAYER_NAME;
use crate::game::{
    compute_effective, entity_id, EffectiveStats, EntityId, EquipSlot, Item, Position, Skill,
    Spell, ENTRY_POSITION, PLAYER_NAMESPACE,
};
use crate::ReckoningError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassArchetype {
    Fighter,
    Rogue,
    Warlock,
    Deprived,
}

impl ClassArchetype {
    pub const ALL: [ClassArchetype; 4] = [
        ClassArchetype::Fighter,
        ClassArchetype::Rogue,
        ClassArchetype::Warlock,
        ClassArchetype::Deprived,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClassArchetype::Fighter => "Fighter",
            ClassArchetype::Rogue => "Rogue",
            ClassArchetype::Warlock => "Warlock",
            ClassArchetype::Deprived => "Deprived",
        }
    }

    /// Starting stat line for the class.
    pub fn base_profile(self) -> BaseProfile {
        match self {
            ClassArchetype::Fighter => BaseProfile {
                hp: 100,
                mana: 50,
                intelligence: 10,
                attack_bonus: 12,
                defense: 6,
                armor_class: 14,
                range: 1,
                action_points: 3,
            },
            ClassArchetype::Rogue => BaseProfile {
                hp: 80,
                mana: 40,
                intelligence: 8,
                attack_bonus: 10,
                defense: 3,
                armor_class: 15,
                range: 1,
                action_points: 4,
            },
            ClassArchetype::Warlock => BaseProfile {
                hp: 70,
                mana: 80,
                intelligence: 16,
                attack_bonus: 6,
                defense: 2,
                armor_class: 12,
                range: 2,
                action_points: 3,
            },
            ClassArchetype::Deprived => BaseProfile {
                hp: 50,
                mana: 50,
                intelligence: 5,
                attack_bonus: 4,
                defense: 0,
                armor_class: 10,
                range: 1,
                action_points: 3,
            },
        }
    }

    /// Spells known at the start of a run.
    pub fn starting_spellbook(self) -> Vec<Spell> {
        match self {
            ClassArchetype::Warlock => vec![Spell::soul_bolt(), Spell::void_nova()],
            ClassArchetype::Fighter | ClassArchetype::Rogue | ClassArchetype::Deprived => {
                Vec::new()
            }
        }
    }
}

impl FromStr for ClassArchetype {
    type Err = ReckoningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassArchetype::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReckoningError::Config(format!("unknown class '{}'", s)))
    }
}

/// Enemy varieties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    VoidHusk,
    Wraith,
    AbyssalChampion,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::VoidHusk => "Void Husk",
            EnemyKind::Wraith => "Wraith",
            EnemyKind::AbyssalChampion => "Abyssal Champion",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            EnemyKind::VoidHusk => 'h',
            EnemyKind::Wraith => 'w',
            EnemyKind::AbyssalChampion => 'C',
        }
    }
}

/// Either a player class or an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Player(ClassArchetype),
    Enemy(EnemyKind),
}

/// Base stat line used to build an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseProfile {
    pub hp: i32,
    pub mana: i32,
    pub intelligence: i32,
    pub attack_bonus: i32,
    pub defense: i32,
    pub armor_class: i32,
    pub range: u32,
    pub action_points: u32,
}

/// One item per persistent slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
    pub hat: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
            EquipSlot::Hat => self.hat.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
            EquipSlot::Hat => &mut self.hat,
        }
    }

    /// Every equipped item, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        EquipSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot))
    }
}

/// The player or an enemy.
///
/// `hp`, `max_hp` and the other numeric fields are base values. `xp` and
/// `gold` are accumulated totals on the player and the death reward on an
/// enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub archetype: Archetype,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub intelligence: i32,
    pub attack_bonus: i32,
    pub defense: i32,
    pub armor_class: i32,
    pub range: u32,
    pub action_points: u32,
    pub max_action_points: u32,
    pub position: Position,
    pub inventory: Vec<Item>,
    pub equipped: Equipment,
    pub skills: Vec<Skill>,
    pub spellbook: Vec<Spell>,
    pub xp: u32,
    pub gold: u32,
    pub level: u32,
}

impl Entity {
    /// Builds an entity from a stat line, at full health and action points.
    pub fn from_profile(
        id: EntityId,
        name: impl Into<String>,
        archetype: Archetype,
        profile: BaseProfile,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            archetype,
            hp: profile.hp,
            max_hp: profile.hp,
            mana: profile.mana,
            max_mana: profile.mana,
            intelligence: profile.intelligence,
            attack_bonus: profile.attack_bonus,
            defense: profile.defense,
            armor_class: profile.armor_class,
            range: profile.range,
            action_points: profile.action_points,
            max_action_points: profile.action_points,
            position,
            inventory: Vec::new(),
            equipped: Equipment::default(),
            skills: Vec::new(),
            spellbook: Vec::new(),
            xp: 0,
            gold: 0,
            level: 1,
        }
    }

    /// Creates a level 1 player of the given class on the entry tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use void_reckoning::{ClassArchetype, Entity, ENTRY_POSITION};
    ///
    /// let player = Entity::new_player(None, ClassArchetype::Fighter);
    /// assert_eq!(player.name, "Soul-Seeker");
    /// assert_eq!(player.hp, 100);
    /// assert_eq!(player.position, ENTRY_POSITION);
    /// ```
    pub fn new_player(name: Option<String>, class: ClassArchetype) -> Self {
        let name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());
        let mut player = Self::from_profile(
            entity_id(PLAYER_NAMESPACE, 0),
            name,
            Archetype::Player(class),
            class.base_profile(),
            ENTRY_POSITION,
        );
        player.spellbook = class.starting_spellbook();
        player
    }

    pub fn is_player(&self) -> bool {
        matches!(self.archetype, Archetype::Player(_))
    }

    /// The player's class, if this is the player.
    pub fn class(&self) -> Option<ClassArchetype> {
        match self.archetype {
            Archetype::Player(class) => Some(class),
            Archetype::Enemy(_) => None,
        }
    }

    /// Effective stats after equipment and skills.
    pub fn stats(&self) -> EffectiveStats {
        compute_effective(self)
    }

    /// Refills action points to the effective maximum.
    pub fn restore_action_points(&mut self) {
        self.action_points = self.stats().max_action_points;
    }

    /// Spends one action point. Returns false if none were left.
    pub fn spend_action_point(&mut self) -> bool {
        if self.action_points == 0 {
            return false;
        }
        self.action_points -= 1;
        true
    }

    /// Pulls hp, mana and action points back under the effective maxima.
    ///
    /// Called after anything that can lower a maximum, such as unequipping.
    pub fn clamp_to_effective(&mut self) {
        let stats = self.stats();
        self.hp = self.hp.clamp(0, stats.max_hp);
        self.mana = self.mana.clamp(0, stats.max_mana);
        self.action_points = self.action_points.min(stats.max_action_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ItemSlot, Modifiers, Rarity};

    fn ring() -> Item {
        Item {
            id: entity_id(1, 1),
            name: "Ring of Reach".to_string(),
            slot: ItemSlot::Accessory,
            rarity: Rarity::Rare,
            modifiers: Modifiers {
                range: 1,
                hp: 20,
                max_action_points: 1,
                ..Modifiers::NONE
            },
        }
    }

    #[test]
    fn test_player_creation_per_class() {
        let fighter = Entity::new_player(Some("Ash".to_string()), ClassArchetype::Fighter);
        assert_eq!(fighter.name, "Ash");
        assert_eq!(fighter.attack_bonus, 12);
        assert_eq!(fighter.armor_class, 14);
        assert_eq!(fighter.level, 1);
        assert!(fighter.spellbook.is_empty());

        let deprived = Entity::new_player(None, ClassArchetype::Deprived);
        assert_eq!(deprived.max_hp, 50);
        assert_eq!(deprived.attack_bonus, 4);

        let warlock = Entity::new_player(Some("  ".to_string()), ClassArchetype::Warlock);
        assert_eq!(warlock.name, DEFAULT_PLAYER_NAME);
        assert_eq!(warlock.spellbook.len(), 2);
        assert!(warlock.is_player());
        assert_eq!(warlock.class(), Some(ClassArchetype::Warlock));
    }

    #[test]
    fn test_class_from_str() {
        assert_eq!("rogue".parse::<ClassArchetype>().unwrap(), ClassArchetype::Rogue);
        assert_eq!(" WARLOCK ".parse::<ClassArchetype>().unwrap(), ClassArchetype::Warlock);
        assert!("bard".parse::<ClassArchetype>().is_err());
    }

    #[test]
    fn test_action_point_spending() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        assert!(player.spend_action_point());
        assert!(player.spend_action_point());
        assert!(player.spend_action_point());
        assert!(!player.spend_action_point());
        assert_eq!(player.action_points, 0);

        player.restore_action_points();
        assert_eq!(player.action_points, 3);
    }

    #[test]
    fn test_clamp_after_losing_equipment() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        player.equipped.accessory = Some(ring());
        player.hp = 120;
        player.restore_action_points();
        assert_eq!(player.action_points, 4);

        player.equipped.accessory = None;
        player.clamp_to_effective();
        assert_eq!(player.hp, 100);
        assert_eq!(player.action_points, 3);
    }

    #[test]
    fn test_equipment_iteration() {
        let mut equipment = Equipment::default();
        assert_eq!(equipment.iter().count(), 0);
        *equipment.slot_mut(EquipSlot::Accessory) = Some(ring());
        assert_eq!(equipment.iter().count(), 1);
        assert!(equipment.get(EquipSlot::Weapon).is_none());
    }
}
