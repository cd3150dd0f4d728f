//! Inventory domain module: equipment slots, ordered storage, and the rules
//! for moving items between them.
//!
//! This crate contains business rules only, implemented as deterministic
//! domain logic (no IO, no rendering, no storage transport).

pub mod item;
pub mod placement;
pub mod slot;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod store;
pub mod target;

pub use item::{Item, NewItem};
pub use placement::Placement;
pub use slot::{EquipSlot, SlotAssignment};
pub use snapshot::InventorySnapshot;
pub use stats::{StatValue, Stats, format_stats, parse_stats};
pub use storage::StorageOrder;
pub use store::{
    CreateItem, InventoryCommand, InventoryEvent, InventoryStore, ItemCreated, ItemMoved,
    ItemRemoved, Location, MoveItem, PlaceItem, RemoveItem,
};
pub use target::{DropTarget, STORAGE_CONTAINER_ID};
