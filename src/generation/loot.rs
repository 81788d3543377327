//! # Loot
//!
//! The pool of item templates boxes drop from. Draws are weighted by rarity,
//! so a common template is six times as likely as a legendary one.

use crate::game::{Item, ItemId, ItemSlot, Modifiers, Rarity};
use crate::utils::RandomSource;
use serde::{Deserialize, Serialize};

/// Blueprint for an item. Each drop stamps out a fresh [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTemplate {
    pub name: String,
    pub slot: ItemSlot,
    pub rarity: Rarity,
    pub modifiers: Modifiers,
}

impl LootTemplate {
    pub fn new(name: &str, slot: ItemSlot, rarity: Rarity, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            slot,
            rarity,
            modifiers,
        }
    }

    /// Creates an item from this template.
    pub fn instantiate(&self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name.clone(),
            slot: self.slot,
            rarity: self.rarity,
            modifiers: self.modifiers,
        }
    }
}

/// Weighted pool of loot templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    templates: Vec<LootTemplate>,
}

impl LootTable {
    pub fn new(templates: Vec<LootTemplate>) -> Self {
        Self { templates }
    }

    /// The standard pool.
    pub fn standard() -> Self {
        use ItemSlot::*;
        use Rarity::*;

        Self::new(vec![
            LootTemplate::new(
                "Shattered Soul-Blade",
                Weapon,
                Common,
                Modifiers { attack: 8, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Neon Soul-Fire",
                Weapon,
                Legendary,
                Modifiers { attack: 25, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Void-Touched Garb",
                Armor,
                Rare,
                Modifiers { defense: 6, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Charcoal Mask",
                Hat,
                Common,
                Modifiers { defense: 3, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Ring of Reach",
                Accessory,
                Rare,
                Modifiers { range: 1, intelligence: 3, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Ichor Draught",
                Consumable,
                Common,
                Modifiers { hp: 50, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Mana Phial",
                Consumable,
                Common,
                Modifiers { mana: 30, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Quickening Draught",
                Consumable,
                Rare,
                Modifiers { max_action_points: 1, ..Modifiers::NONE },
            ),
            // Scroll damage rides on `attack`, its radius on `range`.
            LootTemplate::new(
                "Scroll of Embers",
                Scroll,
                Rare,
                Modifiers { attack: 15, range: 2, area_effect: true, ..Modifiers::NONE },
            ),
            LootTemplate::new(
                "Rift Shard",
                Scroll,
                Rare,
                Modifiers { teleport: true, ..Modifiers::NONE },
            ),
        ])
    }

    pub fn templates(&self) -> &[LootTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn total_weight(&self) -> u32 {
        self.templates.iter().map(|t| t.rarity.drop_weight()).sum()
    }

    /// Draws one template, weighted by rarity. `None` only for an empty table.
    pub fn roll(&self, rng: &mut dyn RandomSource) -> Option<&LootTemplate> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }

        let mut ticket = rng.roll_range(1, total as i32) as u32;
        for template in &self.templates {
            let weight = template.rarity.drop_weight();
            if ticket <= weight {
                return Some(template);
            }
            ticket -= weight;
        }
        self.templates.last()
    }
}

impl Default for LootTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity_id;
    use crate::utils::{ScriptedRolls, SeededRng};
    use std::collections::HashMap;

    #[test]
    fn test_standard_table_contents() {
        let table = LootTable::standard();
        assert_eq!(table.len(), 10);
        // 4 common, 5 rare, 1 legendary
        assert_eq!(table.total_weight(), 4 * 6 + 5 * 3 + 1);
    }

    #[test]
    fn test_roll_walks_weights_in_order() {
        let table = LootTable::standard();
        let mut rolls = ScriptedRolls::new([1, 6, 7, 9, 10]);
        let names: Vec<&str> = (0..5)
            .map(|_| table.roll(&mut rolls).unwrap().name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Shattered Soul-Blade",
                "Shattered Soul-Blade",
                "Neon Soul-Fire",
                "Void-Touched Garb",
                "Void-Touched Garb"
            ]
        );
    }

    #[test]
    fn test_commons_outnumber_legendaries() {
        let table = LootTable::standard();
        let mut rng = SeededRng::new(11);
        let mut counts: HashMap<Rarity, u32> = HashMap::new();
        for _ in 0..2000 {
            let template = table.roll(&mut rng).unwrap();
            *counts.entry(template.rarity).or_default() += 1;
        }
        assert!(counts[&Rarity::Common] > counts[&Rarity::Legendary] * 3);
    }

    #[test]
    fn test_empty_table_rolls_nothing() {
        let table = LootTable::new(Vec::new());
        assert!(table.is_empty());
        assert!(table.roll(&mut SeededRng::new(1)).is_none());
    }

    #[test]
    fn test_instantiate_stamps_fresh_ids() {
        let table = LootTable::standard();
        let template = &table.templates()[5];
        let a = template.instantiate(entity_id(u64::MAX, 1));
        let b = template.instantiate(entity_id(u64::MAX, 2));
        assert_eq!(a.name, "Ichor Draught");
        assert_eq!(a.modifiers.hp, 50);
        assert_ne!(a.id, b.id);
    }
}
