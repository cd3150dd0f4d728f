use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loadout_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Entity, ItemId};
use loadout_events::Event;

use crate::item::{Item, NewItem};
use crate::placement::{self, Placement};
use crate::slot::{EquipSlot, SlotAssignment};
use crate::storage::StorageOrder;
use crate::target::DropTarget;

/// Where an item currently lives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Location {
    Equipped(EquipSlot),
    Stored(usize),
}

/// Aggregate root: the whole inventory (catalog, slots, storage order).
///
/// Every catalog item is either equipped (referenced by exactly one slot) or
/// stored (present once in the storage order), never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    pub(crate) items: HashMap<ItemId, Item>,
    pub(crate) slots: SlotAssignment,
    pub(crate) storage: StorageOrder,
    pub(crate) version: u64,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.get(item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn slots(&self) -> &SlotAssignment {
        &self.slots
    }

    pub fn storage_order(&self) -> &StorageOrder {
        &self.storage
    }

    /// Stored items in storage order.
    ///
    /// Lazy; clone the iterator (or call again) to restart it.
    pub fn stored_items(&self) -> impl Iterator<Item = &Item> + Clone + '_ {
        self.storage.iter().filter_map(|id| self.items.get(id))
    }

    /// The item currently equipped in `slot`.
    pub fn slot_contents(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(slot).and_then(|id| self.items.get(id))
    }

    /// Every slot with its item, in display order.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipSlot, Option<&Item>)> + '_ {
        EquipSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.slot_contents(slot)))
    }

    pub fn location(&self, item_id: &ItemId) -> Option<Location> {
        if let Some(slot) = self.slots.slot_of(item_id) {
            return Some(Location::Equipped(slot));
        }
        self.storage.position(item_id).map(Location::Stored)
    }

    /// Create an item from a draft and append it to storage.
    ///
    /// A blank name fails before any id is allocated.
    pub fn create(&mut self, draft: NewItem) -> DomainResult<ItemId> {
        let cmd = CreateItem::new(draft)?;
        let item_id = cmd.item_id.clone();
        self.execute(&InventoryCommand::CreateItem(cmd))?;
        Ok(item_id)
    }

    /// Resolve a drop of `item_id` onto the raw `target` identifier.
    ///
    /// Returns the placement that was applied, or `None` when the gesture was
    /// a no-op (unknown ids, self-drop, already in place).
    pub fn resolve_move(&mut self, item_id: &ItemId, target: &str) -> Option<Placement> {
        self.commit_move(MoveItem {
            item_id: item_id.clone(),
            target: target.to_string(),
            occurred_at: Utc::now(),
        })
    }

    /// Delete an item from the catalog, its slot and storage. Unknown ids are ignored.
    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        match self.decide_remove(&RemoveItem {
            item_id: item_id.clone(),
            occurred_at: Utc::now(),
        }) {
            Some(event) => {
                self.apply(&event);
                true
            }
            None => false,
        }
    }

    pub fn equip(&mut self, item_id: &ItemId, slot: EquipSlot) -> Option<Placement> {
        self.place(item_id, Placement::Equip { slot })
    }

    /// Move a stored item to `to` (an index into storage without the item).
    pub fn move_within_storage(&mut self, item_id: &ItemId, to: usize) -> Option<Placement> {
        let from = self.storage.position(item_id)?;
        self.place(item_id, Placement::Reorder { from, to })
    }

    pub fn insert_into_storage_at(&mut self, item_id: &ItemId, index: usize) -> Option<Placement> {
        self.place(item_id, Placement::InsertAt { index })
    }

    pub fn send_to_storage_end(&mut self, item_id: &ItemId) -> Option<Placement> {
        self.place(item_id, Placement::Stow)
    }

    fn place(&mut self, item_id: &ItemId, placement: Placement) -> Option<Placement> {
        let event = self.decide_place(&PlaceItem {
            item_id: item_id.clone(),
            placement,
            occurred_at: Utc::now(),
        })?;
        self.apply(&event);
        event.placement()
    }

    fn commit_move(&mut self, cmd: MoveItem) -> Option<Placement> {
        let event = self.decide_move(&cmd)?;
        self.apply(&event);
        event.placement()
    }

    /// Verify the partition, uniqueness and referential invariants.
    pub fn check_invariants(&self) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for id in self.slots.equipped_ids() {
            if !seen.insert(id) {
                return Err(DomainError::invariant(format!("{id} equipped in two slots")));
            }
        }
        for id in &self.storage {
            if !seen.insert(id) {
                return Err(DomainError::invariant(format!("{id} located twice")));
            }
        }
        for id in &seen {
            if !self.items.contains_key(*id) {
                return Err(DomainError::invariant(format!("{id} referenced but not in catalog")));
            }
        }
        if seen.len() != self.items.len() {
            return Err(DomainError::invariant("catalog item with no location"));
        }
        Ok(())
    }
}

impl AggregateRoot for InventoryStore {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItem {
    pub item_id: ItemId,
    pub draft: NewItem,
    pub occurred_at: DateTime<Utc>,
}

impl CreateItem {
    /// Validate the draft and assign a fresh id.
    pub fn new(draft: NewItem) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            item_id: ItemId::new(),
            draft,
            occurred_at: Utc::now(),
        })
    }
}

/// Command: MoveItem (a raw drop gesture).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveItem {
    pub item_id: ItemId,
    pub target: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PlaceItem (an explicit placement, bypassing target resolution).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceItem {
    pub item_id: ItemId,
    pub placement: Placement,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryCommand {
    CreateItem(CreateItem),
    MoveItem(MoveItem),
    PlaceItem(PlaceItem),
    RemoveItem(RemoveItem),
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemMoved. Carries the resolved placement, not the raw target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMoved {
    pub item_id: ItemId,
    pub placement: Placement,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemCreated(ItemCreated),
    ItemMoved(ItemMoved),
    ItemRemoved(ItemRemoved),
}

impl InventoryEvent {
    pub fn item_id(&self) -> &ItemId {
        match self {
            InventoryEvent::ItemCreated(e) => e.item.id(),
            InventoryEvent::ItemMoved(e) => &e.item_id,
            InventoryEvent::ItemRemoved(e) => &e.item_id,
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        match self {
            InventoryEvent::ItemMoved(e) => Some(e.placement),
            _ => None,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemCreated(_) => "inventory.item.created",
            InventoryEvent::ItemMoved(_) => "inventory.item.moved",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemCreated(e) => e.occurred_at,
            InventoryEvent::ItemMoved(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryStore {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemCreated(e) => {
                let item_id = e.item.id().clone();
                self.items.insert(item_id.clone(), e.item.clone());
                self.storage.push_back(item_id);
            }
            InventoryEvent::ItemMoved(e) => {
                if self.items.contains_key(&e.item_id) {
                    placement::apply(&e.item_id, e.placement, &mut self.slots, &mut self.storage);
                }
            }
            InventoryEvent::ItemRemoved(e) => {
                self.items.remove(&e.item_id);
                self.storage.remove(&e.item_id);
                self.slots.clear_item(&e.item_id);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::CreateItem(cmd) => self.handle_create(cmd).map(|e| vec![e]),
            InventoryCommand::MoveItem(cmd) => Ok(self.decide_move(cmd).into_iter().collect()),
            InventoryCommand::PlaceItem(cmd) => Ok(self.decide_place(cmd).into_iter().collect()),
            InventoryCommand::RemoveItem(cmd) => Ok(self.decide_remove(cmd).into_iter().collect()),
        }
    }
}

impl InventoryStore {
    fn handle_create(&self, cmd: &CreateItem) -> Result<InventoryEvent, DomainError> {
        if self.items.contains_key(&cmd.item_id) {
            return Err(DomainError::invariant(format!(
                "item {} already exists",
                cmd.item_id
            )));
        }
        let item = cmd.draft.clone().into_item(cmd.item_id.clone())?;
        Ok(InventoryEvent::ItemCreated(ItemCreated {
            item,
            occurred_at: cmd.occurred_at,
        }))
    }

    fn decide_move(&self, cmd: &MoveItem) -> Option<InventoryEvent> {
        if !self.items.contains_key(&cmd.item_id) {
            tracing::debug!(item_id = %cmd.item_id, target = %cmd.target, "move ignored: unknown item");
            return None;
        }
        let target = DropTarget::classify(&cmd.target, &self.storage);
        let Some(placement) = placement::resolve(&cmd.item_id, &target, &self.slots, &self.storage)
        else {
            tracing::debug!(item_id = %cmd.item_id, target = %cmd.target, "move resolved to no-op");
            return None;
        };
        tracing::debug!(item_id = %cmd.item_id, target = %cmd.target, %placement, "move resolved");
        Some(InventoryEvent::ItemMoved(ItemMoved {
            item_id: cmd.item_id.clone(),
            placement,
            occurred_at: cmd.occurred_at,
        }))
    }

    fn decide_place(&self, cmd: &PlaceItem) -> Option<InventoryEvent> {
        if !self.items.contains_key(&cmd.item_id) {
            return None;
        }
        let placement = placement::normalize(&cmd.item_id, cmd.placement, &self.slots, &self.storage)?;
        Some(InventoryEvent::ItemMoved(ItemMoved {
            item_id: cmd.item_id.clone(),
            placement,
            occurred_at: cmd.occurred_at,
        }))
    }

    fn decide_remove(&self, cmd: &RemoveItem) -> Option<InventoryEvent> {
        if !self.items.contains_key(&cmd.item_id) {
            tracing::debug!(item_id = %cmd.item_id, "remove ignored: unknown item");
            return None;
        }
        Some(InventoryEvent::ItemRemoved(ItemRemoved {
            item_id: cmd.item_id.clone(),
            occurred_at: cmd.occurred_at,
        }))
    }
}
