//! Equipment slots and the slot assignment map.

use serde::{Deserialize, Serialize};

use loadout_core::ItemId;

/// One of the fixed anatomical equipment slots.
///
/// Variant order is display order; `Ord` follows it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipSlot {
    Head,
    Chest,
    Legs,
    MainHand,
    OffHand,
}

impl EquipSlot {
    pub const COUNT: usize = 5;

    /// Every slot, in display order.
    pub const ALL: [EquipSlot; Self::COUNT] = [
        EquipSlot::Head,
        EquipSlot::Chest,
        EquipSlot::Legs,
        EquipSlot::MainHand,
        EquipSlot::OffHand,
    ];

    /// Wire identifier, as used by drop targets and save files.
    pub fn id(self) -> &'static str {
        match self {
            EquipSlot::Head => "head",
            EquipSlot::Chest => "chest",
            EquipSlot::Legs => "legs",
            EquipSlot::MainHand => "mainHand",
            EquipSlot::OffHand => "offHand",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            EquipSlot::Head => "Head",
            EquipSlot::Chest => "Chest",
            EquipSlot::Legs => "Legs",
            EquipSlot::MainHand => "Main Hand",
            EquipSlot::OffHand => "Off Hand",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.id() == id)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.id())
    }
}

/// Which item (if any) each slot holds.
///
/// Only ids live here; the catalog owns the items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAssignment {
    slots: [Option<ItemId>; EquipSlot::COUNT],
}

impl SlotAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&ItemId> {
        self.slots[slot.index()].as_ref()
    }

    /// Put `item_id` in `slot`, returning whatever was there before.
    pub fn set(&mut self, slot: EquipSlot, item_id: ItemId) -> Option<ItemId> {
        self.slots[slot.index()].replace(item_id)
    }

    pub fn take(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.slots[slot.index()].take()
    }

    /// Clear every slot referencing `item_id`. Returns whether any was cleared.
    pub fn clear_item(&mut self, item_id: &ItemId) -> bool {
        let mut cleared = false;
        for entry in &mut self.slots {
            if entry.as_ref() == Some(item_id) {
                *entry = None;
                cleared = true;
            }
        }
        cleared
    }

    /// First slot (in display order) holding `item_id`.
    pub fn slot_of(&self, item_id: &ItemId) -> Option<EquipSlot> {
        self.iter()
            .find(|(_, held)| *held == Some(item_id))
            .map(|(slot, _)| slot)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.slot_of(item_id).is_some()
    }

    /// Every slot with its content, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, Option<&ItemId>)> + '_ {
        EquipSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.get(slot)))
    }

    /// Ids of all equipped items, in slot display order.
    pub fn equipped_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        s.parse().unwrap()
    }

    #[test]
    fn slot_ids_round_trip_and_keep_display_order() {
        for slot in EquipSlot::ALL {
            assert_eq!(EquipSlot::from_id(slot.id()), Some(slot));
        }
        assert_eq!(EquipSlot::from_id("mainHand"), Some(EquipSlot::MainHand));
        assert_eq!(EquipSlot::from_id("main_hand"), None);
        assert_eq!(EquipSlot::MainHand.label(), "Main Hand");
        assert!(EquipSlot::Head < EquipSlot::OffHand);
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&EquipSlot::OffHand).unwrap();
        assert_eq!(json, "\"offHand\"");
    }

    #[test]
    fn set_returns_displaced_item() {
        let mut slots = SlotAssignment::new();
        assert_eq!(slots.set(EquipSlot::MainHand, id("sword")), None);
        assert_eq!(slots.set(EquipSlot::MainHand, id("axe")), Some(id("sword")));
        assert_eq!(slots.get(EquipSlot::MainHand), Some(&id("axe")));
    }

    #[test]
    fn clear_item_clears_every_reference() {
        let mut slots = SlotAssignment::new();
        slots.set(EquipSlot::MainHand, id("sword"));
        slots.set(EquipSlot::OffHand, id("sword"));
        slots.set(EquipSlot::Head, id("helm"));

        assert!(slots.clear_item(&id("sword")));
        assert!(!slots.contains(&id("sword")));
        assert_eq!(slots.slot_of(&id("helm")), Some(EquipSlot::Head));
        assert!(!slots.clear_item(&id("sword")));
    }
}
