//! # Items
//!
//! Item, skill and spell definitions. Items are immutable once minted; only
//! their location (inventory, equipment slot, floor tile) ever changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

/// What kind of item this is, and therefore where it goes when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSlot {
    Weapon,
    Armor,
    Accessory,
    Hat,
    /// Drunk on use and gone.
    Consumable,
    /// Read on use and gone. Carries area or teleport effects.
    Scroll,
}

impl ItemSlot {
    /// The equipment slot this item occupies, if it is wearable.
    pub fn equip_slot(self) -> Option<EquipSlot> {
        match self {
            ItemSlot::Weapon => Some(EquipSlot::Weapon),
            ItemSlot::Armor => Some(EquipSlot::Armor),
            ItemSlot::Accessory => Some(EquipSlot::Accessory),
            ItemSlot::Hat => Some(EquipSlot::Hat),
            ItemSlot::Consumable | ItemSlot::Scroll => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemSlot::Weapon => "weapon",
            ItemSlot::Armor => "armor",
            ItemSlot::Accessory => "accessory",
            ItemSlot::Hat => "hat",
            ItemSlot::Consumable => "consumable",
            ItemSlot::Scroll => "scroll",
        }
    }
}

/// Persistent equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
    Hat,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 4] = [
        EquipSlot::Weapon,
        EquipSlot::Armor,
        EquipSlot::Accessory,
        EquipSlot::Hat,
    ];
}

/// Display tier. Only the loot draw weight depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    /// Relative draw weight in the loot table.
    pub fn drop_weight(self) -> u32 {
        match self {
            Rarity::Common => 6,
            Rarity::Rare => 3,
            Rarity::Legendary => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEGENDARY",
        }
    }
}

/// Sparse bundle of stat bonuses shared by items and skills.
///
/// Unset fields are zero. On equipment and skills the numbers are added to
/// effective stats; on consumables `hp`, `mana` and `max_action_points` are
/// restored instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub range: i32,
    pub max_action_points: i32,
    pub intelligence: i32,
    pub mana: i32,
    pub area_effect: bool,
    pub teleport: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        attack: 0,
        defense: 0,
        hp: 0,
        range: 0,
        max_action_points: 0,
        intelligence: 0,
        mana: 0,
        area_effect: false,
        teleport: false,
    };

    /// Short human-readable summary, e.g. `+8 atk +1 rng`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (value, label) in [
            (self.attack, "atk"),
            (self.defense, "def"),
            (self.hp, "hp"),
            (self.range, "rng"),
            (self.max_action_points, "ap"),
            (self.intelligence, "int"),
            (self.mana, "mana"),
        ] {
            if value != 0 {
                parts.push(format!("{:+} {}", value, label));
            }
        }
        if self.area_effect {
            parts.push("area".to_string());
        }
        if self.teleport {
            parts.push("teleport".to_string());
        }
        parts.join(" ")
    }
}

/// A concrete item instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub slot: ItemSlot,
    pub rarity: Rarity,
    pub modifiers: Modifiers,
}

/// A permanent upgrade learned on descent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modifiers: Modifiers,
}

impl Skill {
    pub fn new(id: &str, name: &str, description: &str, modifiers: Modifiers) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            modifiers,
        }
    }
}

/// An active ability paid for with mana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub mana_cost: i32,
    pub range: u32,
    /// Flat damage before the intelligence bonus.
    pub power: i32,
    /// Also strikes every enemy adjacent to the target tile.
    pub area: bool,
}

impl Spell {
    /// The warlock's opening spell.
    pub fn soul_bolt() -> Self {
        Self {
            name: "Soul Bolt".to_string(),
            mana_cost: 10,
            range: 4,
            power: 12,
            area: false,
        }
    }

    /// The warlock's area spell.
    pub fn void_nova() -> Self {
        Self {
            name: "Void Nova".to_string(),
            mana_cost: 25,
            range: 3,
            power: 8,
            area: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equip_slot_mapping() {
        assert_eq!(ItemSlot::Weapon.equip_slot(), Some(EquipSlot::Weapon));
        assert_eq!(ItemSlot::Hat.equip_slot(), Some(EquipSlot::Hat));
        assert_eq!(ItemSlot::Consumable.equip_slot(), None);
        assert_eq!(ItemSlot::Scroll.equip_slot(), None);
    }

    #[test]
    fn test_rarity_ordering_and_weight() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Legendary);
        assert!(Rarity::Common.drop_weight() > Rarity::Legendary.drop_weight());
    }

    #[test]
    fn test_modifier_summary() {
        let modifiers = Modifiers {
            attack: 8,
            range: 1,
            area_effect: true,
            ..Modifiers::NONE
        };
        assert_eq!(modifiers.summary(), "+8 atk +1 rng area");
        assert_eq!(Modifiers::NONE.summary(), "");
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
