//! Classification of raw drop-target identifiers.

use loadout_core::ItemId;

use crate::slot::EquipSlot;
use crate::storage::StorageOrder;

/// Reserved target id for the storage container itself.
pub const STORAGE_CONTAINER_ID: &str = "storage";

/// What a raw target identifier refers to, checked in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Another item currently in storage, at `index`.
    StoredItem { item_id: ItemId, index: usize },
    /// The storage container.
    Storage,
    /// An equipment slot.
    Slot(EquipSlot),
    /// Nothing this inventory knows about.
    Unknown,
}

impl DropTarget {
    /// Stored items win over the reserved container id, which wins over slot
    /// ids, so an item whose id collides with a reserved name is still
    /// reachable as a drop target.
    pub fn classify(target: &str, storage: &StorageOrder) -> Self {
        if let Ok(item_id) = target.parse::<ItemId>() {
            if let Some(index) = storage.position(&item_id) {
                return DropTarget::StoredItem { item_id, index };
            }
        }
        if target == STORAGE_CONTAINER_ID {
            return DropTarget::Storage;
        }
        match EquipSlot::from_id(target) {
            Some(slot) => DropTarget::Slot(slot),
            None => DropTarget::Unknown,
        }
    }
}
