//! # Inventory
//!
//! Equip, unequip and consume. Items move between the inventory and the
//! equipment slots; they are never copied, so a modifier can never apply
//! twice.

use crate::game::{Entity, EquipSlot, Item, ItemId, ItemSlot};

/// Equips an item from the inventory.
///
/// Whatever was in the slot goes back into the inventory. Returns the slot
/// used, or `None` if the item is missing or not wearable.
pub fn equip(entity: &mut Entity, item_id: ItemId) -> Option<EquipSlot> {
    let index = entity.inventory.iter().position(|item| item.id == item_id)?;
    let slot = entity.inventory[index].slot.equip_slot()?;

    let item = entity.inventory.remove(index);
    if let Some(previous) = entity.equipped.slot_mut(slot).replace(item) {
        entity.inventory.push(previous);
    }
    entity.clamp_to_effective();
    Some(slot)
}

/// Moves the item in `slot` back into the inventory.
pub fn unequip(entity: &mut Entity, slot: EquipSlot) -> Option<ItemId> {
    let item = entity.equipped.slot_mut(slot).take()?;
    let id = item.id;
    entity.inventory.push(item);
    entity.clamp_to_effective();
    Some(id)
}

/// Drinks a consumable: restores hp, mana and action points up to the
/// effective maxima, then removes it from the inventory for good.
///
/// # Examples
///
/// ```
/// use void_reckoning::{consume, entity_id, ClassArchetype, Entity, Item, ItemSlot, Modifiers, Rarity};
///
/// let mut player = Entity::new_player(None, ClassArchetype::Fighter);
/// player.hp = 60;
/// let draught = Item {
///     id: entity_id(u64::MAX, 1),
///     name: "Ichor Draught".to_string(),
///     slot: ItemSlot::Consumable,
///     rarity: Rarity::Common,
///     modifiers: Modifiers { hp: 50, ..Modifiers::NONE },
/// };
/// player.inventory.push(draught.clone());
///
/// assert!(consume(&mut player, draught.id).is_some());
/// assert_eq!(player.hp, 100);
/// assert!(player.inventory.is_empty());
/// ```
pub fn consume(entity: &mut Entity, item_id: ItemId) -> Option<Item> {
    let index = entity
        .inventory
        .iter()
        .position(|item| item.id == item_id && item.slot == ItemSlot::Consumable)?;
    let item = entity.inventory.remove(index);

    let stats = entity.stats();
    let restore = item.modifiers;
    entity.hp = (entity.hp + restore.hp.max(0)).min(stats.max_hp);
    entity.mana = (entity.mana + restore.mana.max(0)).min(stats.max_mana);
    entity.action_points = entity
        .action_points
        .saturating_add_signed(restore.max_action_points.max(0))
        .min(stats.max_action_points);
    Some(item)
}

/// Removes an item from the inventory without applying it.
pub fn take(entity: &mut Entity, item_id: ItemId) -> Option<Item> {
    let index = entity.inventory.iter().position(|item| item.id == item_id)?;
    Some(entity.inventory.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{entity_id, ClassArchetype, Modifiers, Rarity};

    fn item(serial: u64, name: &str, slot: ItemSlot, modifiers: Modifiers) -> Item {
        Item {
            id: entity_id(u64::MAX, serial),
            name: name.to_string(),
            slot,
            rarity: Rarity::Common,
            modifiers,
        }
    }

    fn blade(serial: u64, attack: i32) -> Item {
        item(
            serial,
            "Blade",
            ItemSlot::Weapon,
            Modifiers {
                attack,
                ..Modifiers::NONE
            },
        )
    }

    #[test]
    fn test_equip_moves_item_into_slot() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let sword = blade(1, 8);
        player.inventory.push(sword.clone());

        assert_eq!(equip(&mut player, sword.id), Some(EquipSlot::Weapon));
        assert!(player.inventory.is_empty());
        assert_eq!(player.equipped.weapon.as_ref().map(|i| i.id), Some(sword.id));
        assert_eq!(player.stats().attack_bonus, 20);
    }

    #[test]
    fn test_equip_swaps_previous_back() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let old = blade(1, 8);
        let new = blade(2, 25);
        player.equipped.weapon = Some(old.clone());
        player.inventory.push(new.clone());

        equip(&mut player, new.id);
        assert_eq!(player.equipped.weapon.as_ref().map(|i| i.id), Some(new.id));
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0].id, old.id);
        assert_eq!(player.stats().attack_bonus, 37);
    }

    #[test]
    fn test_equip_round_trip_restores_state() {
        let mut player = Entity::new_player(None, ClassArchetype::Rogue);
        let old = blade(1, 8);
        let new = blade(2, 25);
        let potion = item(3, "Ichor Draught", ItemSlot::Consumable, Modifiers::NONE);
        player.equipped.weapon = Some(old.clone());
        player.inventory.push(new.clone());
        player.inventory.push(potion.clone());

        let mut before: Vec<ItemId> = player.inventory.iter().map(|i| i.id).collect();
        before.sort();

        equip(&mut player, new.id);
        equip(&mut player, old.id);

        let mut after: Vec<ItemId> = player.inventory.iter().map(|i| i.id).collect();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(player.equipped.weapon.as_ref().map(|i| i.id), Some(old.id));
    }

    #[test]
    fn test_equip_rejects_consumables_and_unknown_items() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let potion = item(3, "Ichor Draught", ItemSlot::Consumable, Modifiers::NONE);
        player.inventory.push(potion.clone());

        assert_eq!(equip(&mut player, potion.id), None);
        assert_eq!(equip(&mut player, entity_id(5, 5)), None);
        assert_eq!(player.inventory.len(), 1);
    }

    #[test]
    fn test_unequip_clamps_hp() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let garb = item(
            4,
            "Void-Touched Garb",
            ItemSlot::Armor,
            Modifiers {
                hp: 30,
                ..Modifiers::NONE
            },
        );
        player.inventory.push(garb.clone());
        equip(&mut player, garb.id);
        player.hp = 130;

        assert_eq!(unequip(&mut player, EquipSlot::Armor), Some(garb.id));
        assert_eq!(player.hp, 100);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(unequip(&mut player, EquipSlot::Armor), None);
    }

    #[test]
    fn test_consume_restores_within_limits() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        player.hp = 60;
        player.mana = 10;
        player.action_points = 1;
        let tonic = item(
            5,
            "Tonic",
            ItemSlot::Consumable,
            Modifiers {
                hp: 15,
                mana: 100,
                max_action_points: 1,
                ..Modifiers::NONE
            },
        );
        player.inventory.push(tonic.clone());

        let used = consume(&mut player, tonic.id).expect("tonic should be consumed");
        assert_eq!(used.name, "Tonic");
        assert_eq!(player.hp, 75);
        assert_eq!(player.mana, 50);
        assert_eq!(player.action_points, 2);
        assert!(consume(&mut player, tonic.id).is_none());
    }

    #[test]
    fn test_consume_ignores_equipment() {
        let mut player = Entity::new_player(None, ClassArchetype::Fighter);
        let sword = blade(1, 8);
        player.inventory.push(sword.clone());
        assert!(consume(&mut player, sword.id).is_none());
        assert!(take(&mut player, sword.id).is_some());
        assert!(player.inventory.is_empty());
    }
}
