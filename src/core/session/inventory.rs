//=========================================================================
// Inventory
//=========================================================================
//
// Player item slots plus the small item catalogue loot ids resolve
// against. Stackable items merge into an existing slot with the same id;
// everything else takes a new slot.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use serde::{Deserialize, Serialize};

//=== Item Catalogue ======================================================

/// Display data for a loot id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: String,
    pub stackable: bool,
}

/// Resolves a loot id. Unknown ids fall back to a stackable item named
/// after the id.
pub fn item_info(id: &str) -> ItemInfo {
    let (name, stackable) = match id {
        "healing_potion" => ("Healing Potion", true),
        "mana_potion" => ("Mana Potion", true),
        "gold_coin" => ("Gold Coin", true),
        "rusty_key" => ("Rusty Key", false),
        other => (other, true),
    };
    ItemInfo { name: name.to_string(), stackable }
}

//=== ItemSlot ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSlot {
    pub id: String,
    pub name: String,
    pub count: u32,
    pub stackable: bool,
}

//=== Inventory ===========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<ItemSlot>,
    pub gold: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` of `id`: increments a matching slot when the item is
    /// stackable, otherwise appends a new slot.
    pub fn add(&mut self, id: &str, count: u32) {
        let info = item_info(id);

        if info.stackable {
            if let Some(slot) = self.items.iter_mut().find(|slot| slot.id == id) {
                slot.count = slot.count.saturating_add(count);
                info!("+{} {} (now {})", count, info.name, slot.count);
                return;
            }
        }

        info!("+{} {}", count, info.name);
        self.items.push(ItemSlot {
            id: id.to_string(),
            name: info.name,
            count,
            stackable: info.stackable,
        });
    }

    /// Total count of `id` across all slots.
    pub fn count_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .filter(|slot| slot.id == id)
            .fold(0u32, |total, slot| total.saturating_add(slot.count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_add_appends_slot() {
        let mut inventory = Inventory::new();
        inventory.add("healing_potion", 2);

        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.items[0].name, "Healing Potion");
        assert_eq!(inventory.items[0].count, 2);
        assert!(inventory.items[0].stackable);
    }

    #[test]
    fn stackable_items_merge() {
        let mut inventory = Inventory::new();
        inventory.add("mana_potion", 1);
        inventory.add("mana_potion", 4);

        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.count_of("mana_potion"), 5);
    }

    #[test]
    fn stack_counts_saturate() {
        let mut inventory = Inventory::new();
        inventory.add("gold_coin", u32::MAX - 1);
        inventory.add("gold_coin", 5);

        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.count_of("gold_coin"), u32::MAX);
    }

    #[test]
    fn non_stackable_items_take_new_slots() {
        let mut inventory = Inventory::new();
        inventory.add("rusty_key", 1);
        inventory.add("rusty_key", 1);

        assert_eq!(inventory.items.len(), 2);
        assert_eq!(inventory.count_of("rusty_key"), 2);
    }

    #[test]
    fn unknown_ids_use_id_as_name() {
        let info = item_info("potion");
        assert_eq!(info.name, "potion");
        assert!(info.stackable);
    }
}
