//! Persisted shape of an inventory, and lenient conversion to and from it.
//!
//! Loading never fails: unreadable pieces are dropped and the rest is
//! repaired until every store invariant holds.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use loadout_core::{Entity, ItemId};

use crate::item::Item;
use crate::slot::{EquipSlot, SlotAssignment};
use crate::storage::StorageOrder;
use crate::store::InventoryStore;

/// `{ items, storageOrder, slots }` as exchanged with the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventorySnapshot {
    pub items: Vec<Item>,
    pub storage_order: Vec<ItemId>,
    pub slots: BTreeMap<EquipSlot, Option<ItemId>>,
}

impl InventorySnapshot {
    /// Parse persisted JSON text. Unparsable text yields an empty snapshot.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(value) => Self::from_json_value(value),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot is not valid JSON; starting empty");
                Self::default()
            }
        }
    }

    /// Decode each field (and each item) on its own, skipping what does not fit.
    pub fn from_json_value(value: JsonValue) -> Self {
        let JsonValue::Object(mut root) = value else {
            tracing::warn!("snapshot is not a JSON object; starting empty");
            return Self::default();
        };

        let items = match root.remove("items") {
            Some(JsonValue::Array(raw)) => raw
                .into_iter()
                .filter_map(|raw| match serde_json::from_value::<Item>(raw) {
                    Ok(item) => Some(item),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping unreadable item");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        let storage_order = match root.remove("storageOrder") {
            Some(JsonValue::Array(raw)) => raw
                .into_iter()
                .filter_map(|raw| raw.as_str().and_then(|s| s.parse().ok()))
                .collect(),
            _ => Vec::new(),
        };

        let slots = match root.remove("slots") {
            Some(JsonValue::Object(raw)) => raw
                .into_iter()
                .filter_map(|(key, value)| {
                    let slot = EquipSlot::from_id(&key)?;
                    Some((slot, value.as_str().and_then(|s| s.parse().ok())))
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self {
            items,
            storage_order,
            slots,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl InventoryStore {
    /// Capture the current state. Items are listed equipped first (slot
    /// order), then in storage order; all five slots are always present.
    pub fn to_snapshot(&self) -> InventorySnapshot {
        let items = self
            .slots
            .equipped_ids()
            .chain(self.storage.iter())
            .filter_map(|id| self.items.get(id).cloned())
            .collect();

        InventorySnapshot {
            items,
            storage_order: self.storage.iter().cloned().collect(),
            slots: self
                .slots
                .iter()
                .map(|(slot, id)| (slot, id.cloned()))
                .collect(),
        }
    }

    /// Rebuild a store from a snapshot, repairing anything inconsistent.
    ///
    /// - duplicate items: first occurrence wins
    /// - slot or storage ids missing from the catalog: dropped
    /// - an item in several slots: kept in the first slot (display order)
    /// - an equipped item also listed in storage: removed from storage
    /// - items in neither place: appended to storage in catalog order
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        let mut repairs = 0usize;

        let mut catalog_order = Vec::with_capacity(snapshot.items.len());
        let mut items = HashMap::with_capacity(snapshot.items.len());
        for item in snapshot.items {
            let id = item.id().clone();
            if items.contains_key(&id) {
                repairs += 1;
                continue;
            }
            catalog_order.push(id.clone());
            items.insert(id, item);
        }

        let mut slots = SlotAssignment::new();
        for (slot, id) in snapshot.slots {
            let Some(id) = id else { continue };
            if !items.contains_key(&id) || slots.contains(&id) {
                repairs += 1;
                continue;
            }
            slots.set(slot, id);
        }

        let mut storage = StorageOrder::new();
        for id in snapshot.storage_order {
            if !items.contains_key(&id) || slots.contains(&id) || !storage.push_back(id) {
                repairs += 1;
            }
        }

        for id in catalog_order {
            if !slots.contains(&id) && storage.push_back(id) {
                repairs += 1;
            }
        }

        if repairs > 0 {
            tracing::warn!(repairs, "repaired inconsistent inventory snapshot");
        }

        Self {
            items,
            slots,
            storage,
            version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;
    use crate::stats::StatValue;
    use loadout_core::AggregateRoot;

    fn names(store: &InventoryStore) -> Vec<&str> {
        store.stored_items().map(Item::name).collect()
    }

    #[test]
    fn snapshot_round_trip_preserves_layout() {
        let mut store = InventoryStore::new();
        let sword = store.create(NewItem::named("sword")).unwrap();
        store.create(NewItem::named("rope")).unwrap();
        store.create(NewItem::named("torch")).unwrap();
        store.resolve_move(&sword, "mainHand");

        let json = store.to_snapshot().to_json_pretty().unwrap();
        let restored = InventoryStore::from_snapshot(InventorySnapshot::from_json(&json));

        assert_eq!(names(&restored), ["rope", "torch"]);
        assert_eq!(
            restored.slot_contents(EquipSlot::MainHand).map(Item::name),
            Some("sword")
        );
        assert_eq!(restored.version(), 0);
        restored.check_invariants().unwrap();
    }

    #[test]
    fn snapshot_uses_camel_case_and_lists_every_slot() {
        let store = InventoryStore::new();
        let value = serde_json::to_value(store.to_snapshot()).unwrap();

        assert!(value.get("storageOrder").is_some());
        let slots = value["slots"].as_object().unwrap();
        assert_eq!(slots.len(), EquipSlot::COUNT);
        assert!(slots["offHand"].is_null());
    }

    #[test]
    fn legacy_blob_with_stats_loads() {
        let json = r#"{
            "items": [
                {"id": "1700000000000", "name": "Sword", "icon": "⚔", "stats": {"damage": 7, "rarity": "rare"}},
                {"id": "1700000000001", "name": "Cap"}
            ],
            "storageOrder": ["1700000000000"],
            "slots": {"head": "1700000000001", "mainHand": null}
        }"#;

        let store = InventoryStore::from_snapshot(InventorySnapshot::from_json(json));

        let sword: ItemId = "1700000000000".parse().unwrap();
        assert_eq!(
            store.item(&sword).unwrap().stats().get("damage"),
            Some(&StatValue::Number(7.0))
        );
        assert_eq!(store.slot_contents(EquipSlot::Head).map(Item::name), Some("Cap"));
        assert_eq!(names(&store), ["Sword"]);
    }

    #[test]
    fn garbage_input_loads_empty() {
        for text in ["", "not json", "[1,2,3]", "42", r#"{"items": "nope", "slots": 3}"#] {
            let store = InventoryStore::from_snapshot(InventorySnapshot::from_json(text));
            assert!(store.is_empty(), "expected empty store for {text:?}");
            store.check_invariants().unwrap();
        }
    }

    #[test]
    fn corrupt_references_are_repaired() {
        let json = r#"{
            "items": [
                {"id": "a", "name": "A"},
                {"id": "b", "name": "B"},
                {"id": "a", "name": "A again"},
                {"name": "no id"},
                {"id": "c", "name": "C"},
                {"id": "d", "name": "D"}
            ],
            "storageOrder": ["ghost", "b", "b", "a", 17],
            "slots": {"head": "a", "chest": "a", "legs": "ghost", "tail": "c"},
            "extra": true
        }"#;

        let store = InventoryStore::from_snapshot(InventorySnapshot::from_json(json));

        store.check_invariants().unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.slot_contents(EquipSlot::Head).map(Item::name), Some("A"));
        assert!(store.slot_contents(EquipSlot::Chest).is_none());
        assert!(store.slot_contents(EquipSlot::Legs).is_none());
        assert_eq!(names(&store), ["B", "C", "D"]);
    }

    #[test]
    fn padded_ids_still_match_their_references() {
        let json = r#"{
            "items": [{"id": " a", "name": "A"}, {"id": "b ", "name": "B"}],
            "storageOrder": ["b"],
            "slots": {"head": " a"}
        }"#;

        let mut store = InventoryStore::from_snapshot(InventorySnapshot::from_json(json));

        assert_eq!(store.slot_contents(EquipSlot::Head).map(Item::name), Some("A"));
        assert_eq!(names(&store), ["B"]);

        let a: ItemId = " a".parse().unwrap();
        assert!(store.remove(&a));
        assert!(store.slot_contents(EquipSlot::Head).is_none());
        store.check_invariants().unwrap();
    }

    #[test]
    fn items_with_unreadable_fields_are_kept() {
        let json = r#"{
            "items": [
                {"id": "a", "stats": null},
                {"id": "b", "stats": {"lucky": true, "damage": 3}}
            ]
        }"#;

        let store = InventoryStore::from_snapshot(InventorySnapshot::from_json(json));

        assert_eq!(store.len(), 2);
        let b: ItemId = "b".parse().unwrap();
        let stats = store.item(&b).unwrap().stats();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.get("damage"), Some(&StatValue::Number(3.0)));
        assert_eq!(store.storage_order().len(), 2);
        store.check_invariants().unwrap();
    }
}
