//! Placement rules: how a move gesture rewrites slots and storage together.
//!
//! Deciding (`resolve`, `normalize`) is separated from doing (`apply`) so the
//! decision can travel inside an event and be replayed deterministically.

use serde::{Deserialize, Serialize};

use loadout_core::ItemId;

use crate::slot::{EquipSlot, SlotAssignment};
use crate::storage::StorageOrder;
use crate::target::DropTarget;

/// A resolved location change for one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// List-move inside storage: remove at `from`, insert at `to` (an index
    /// into the list after removal). Slots are untouched.
    Reorder { from: usize, to: usize },
    /// Unequip, and append to storage unless already stored.
    Stow,
    /// Unequip, and put into storage at `index` (interpreted after removing
    /// any existing storage entry of the item).
    InsertAt { index: usize },
    /// Equip into `slot`, bumping its previous occupant back to storage.
    Equip { slot: EquipSlot },
}

impl core::fmt::Display for Placement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Placement::Reorder { from, to } => write!(f, "reorder {from}->{to}"),
            Placement::Stow => f.write_str("stow"),
            Placement::InsertAt { index } => write!(f, "insert at {index}"),
            Placement::Equip { slot } => write!(f, "equip {slot}"),
        }
    }
}

/// Decide what dropping `item_id` onto `target` means.
///
/// Precedence: reorder among stored items, then the storage container, then
/// insertion before a stored item (active item not stored), then an equip
/// slot. Returns `None` when the drop changes nothing or matches no rule.
pub fn resolve(
    item_id: &ItemId,
    target: &DropTarget,
    slots: &SlotAssignment,
    storage: &StorageOrder,
) -> Option<Placement> {
    let active_index = storage.position(item_id);

    let candidate = match (target, active_index) {
        (DropTarget::StoredItem { index, .. }, Some(from)) => {
            // Target's index once the active item has been lifted out.
            let to = if from < *index { index - 1 } else { *index };
            Placement::Reorder { from, to }
        }
        (DropTarget::Storage, _) => Placement::Stow,
        (DropTarget::StoredItem { item_id: target_id, index }, None) if target_id != item_id => {
            Placement::InsertAt { index: *index }
        }
        (DropTarget::Slot(slot), _) => Placement::Equip { slot: *slot },
        _ => return None,
    };

    normalize(item_id, candidate, slots, storage)
}

/// Clamp a placement to the current state and drop it if it would be a no-op.
///
/// Used both for resolved gestures and for the primitive operations, which
/// take caller-supplied indices.
pub fn normalize(
    item_id: &ItemId,
    placement: Placement,
    slots: &SlotAssignment,
    storage: &StorageOrder,
) -> Option<Placement> {
    let equipped = slots.contains(item_id);
    let stored_at = storage.position(item_id);

    match placement {
        Placement::Reorder { from, to } => {
            if storage.get(from) != Some(item_id) {
                return None;
            }
            let to = to.min(storage.len() - 1);
            (from != to).then_some(Placement::Reorder { from, to })
        }
        Placement::Stow => (equipped || stored_at.is_none()).then_some(Placement::Stow),
        Placement::InsertAt { index } => {
            let remaining = storage.len() - usize::from(stored_at.is_some());
            let index = index.min(remaining);
            if !equipped && stored_at == Some(index) {
                return None;
            }
            Some(Placement::InsertAt { index })
        }
        Placement::Equip { slot } => {
            (slots.get(slot) != Some(item_id)).then_some(Placement::Equip { slot })
        }
    }
}

/// Apply a placement to slots and storage as one transition.
///
/// Returns the item bumped out of a slot, if any.
pub fn apply(
    item_id: &ItemId,
    placement: Placement,
    slots: &mut SlotAssignment,
    storage: &mut StorageOrder,
) -> Option<ItemId> {
    match placement {
        Placement::Reorder { from, to } => {
            storage.move_to(from, to);
            None
        }
        Placement::Stow => {
            slots.clear_item(item_id);
            storage.push_back(item_id.clone());
            None
        }
        Placement::InsertAt { index } => {
            slots.clear_item(item_id);
            storage.insert(index, item_id.clone());
            None
        }
        Placement::Equip { slot } => {
            let displaced = slots.take(slot).filter(|held| held != item_id);
            if let Some(displaced) = &displaced {
                storage.push_back(displaced.clone());
            }
            slots.clear_item(item_id);
            slots.set(slot, item_id.clone());
            storage.remove(item_id);
            displaced
        }
    }
}
