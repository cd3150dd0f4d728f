//! Request pipeline between the gesture layer and the inventory aggregate.
//!
//! ```text
//! request (create / move / delete)
//!   ↓
//! 1. Handle (pure decision, produces zero or one event)
//!   ↓
//! 2. Apply (one atomic transition of catalog + slots + storage)
//!   ↓
//! 3. Save snapshot (best-effort)
//!   ↓
//! 4. Publish events to the bus (display refresh)
//! ```
//!
//! Requests are serialized through `&mut self`: one gesture is fully resolved
//! before the next is accepted. Save and publish failures are logged and
//! swallowed; the in-memory inventory stays authoritative.

use chrono::Utc;
use thiserror::Error;

use loadout_core::{Aggregate, AggregateRoot, DomainError, ItemId};
use loadout_events::{Event, EventBus, EventEnvelope};
use loadout_inventory::{
    CreateItem, InventoryCommand, InventoryEvent, InventorySnapshot, InventoryStore, MoveItem,
    NewItem, Placement, RemoveItem,
};

use crate::snapshot_store::SnapshotStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The request was rejected; nothing changed.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The aggregate refused a command that would break an invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<DomainError> for SessionError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => SessionError::Validation(msg),
            DomainError::InvariantViolation(msg) => SessionError::InvariantViolation(msg),
            DomainError::InvalidId(msg) => SessionError::Validation(msg),
        }
    }
}

/// The single entry point that owns an inventory and its collaborators.
///
/// - `S`: where snapshots are loaded from and saved to
/// - `B`: where committed events are announced
#[derive(Debug)]
pub struct InventorySession<S, B> {
    inventory: InventoryStore,
    snapshots: S,
    bus: B,
}

impl<S, B> InventorySession<S, B>
where
    S: SnapshotStore,
    B: EventBus<EventEnvelope<InventoryEvent>>,
{
    /// Load the last saved inventory, or start empty if there is none or it
    /// cannot be read.
    pub fn open(snapshots: S, bus: B) -> Self {
        let inventory = match snapshots.load() {
            Ok(Some(snapshot)) => InventoryStore::from_snapshot(snapshot),
            Ok(None) => {
                tracing::info!("no saved inventory; starting empty");
                InventoryStore::new()
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to load inventory; starting empty");
                InventoryStore::new()
            }
        };
        tracing::info!(items = inventory.len(), "inventory session opened");

        Self {
            inventory,
            snapshots,
            bus,
        }
    }

    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        self.inventory.to_snapshot()
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    pub fn subscribe(&self) -> loadout_events::Subscription<EventEnvelope<InventoryEvent>> {
        self.bus.subscribe()
    }

    /// Create an item from form input. `stats_text` is `key=value, ...`.
    pub fn on_create_requested(
        &mut self,
        name: &str,
        icon: Option<&str>,
        description: Option<&str>,
        stats_text: Option<&str>,
    ) -> Result<ItemId, SessionError> {
        let cmd = CreateItem::new(NewItem::from_form(name, icon, description, stats_text))?;
        let item_id = cmd.item_id.clone();
        self.dispatch(InventoryCommand::CreateItem(cmd))?;
        Ok(item_id)
    }

    /// Resolve a drop gesture. Returns the applied placement, if any.
    pub fn on_move_requested(&mut self, active_item_id: &str, target_id: &str) -> Option<Placement> {
        let Ok(item_id) = active_item_id.parse::<ItemId>() else {
            tracing::debug!(active_item_id, target_id, "move ignored: blank item id");
            return None;
        };

        let events = self
            .dispatch(InventoryCommand::MoveItem(MoveItem {
                item_id,
                target: target_id.to_string(),
                occurred_at: Utc::now(),
            }))
            .ok()?;
        events.first().and_then(InventoryEvent::placement)
    }

    /// Delete an item. Returns whether anything was deleted.
    pub fn on_delete_requested(&mut self, item_id: &str) -> bool {
        let Ok(item_id) = item_id.parse::<ItemId>() else {
            return false;
        };

        self.dispatch(InventoryCommand::RemoveItem(RemoveItem {
            item_id,
            occurred_at: Utc::now(),
        }))
        .map(|events| !events.is_empty())
        .unwrap_or(false)
    }

    /// Run a command through handle → apply → save → publish.
    pub fn dispatch(&mut self, command: InventoryCommand) -> Result<Vec<InventoryEvent>, SessionError> {
        let events = self.inventory.execute(&command)?;
        if !events.is_empty() {
            self.commit(&events);
        }
        Ok(events)
    }

    fn commit(&self, events: &[InventoryEvent]) {
        debug_assert!(self.inventory.check_invariants().is_ok());

        if let Err(err) = self.snapshots.save(&self.inventory.to_snapshot()) {
            tracing::error!(error = ?err, "failed to save inventory; keeping in-memory state");
        }

        // The aggregate version is the sequence number of the last event.
        let first_sequence = self.inventory.version() + 1 - events.len() as u64;
        for (offset, event) in events.iter().enumerate() {
            let sequence = first_sequence + offset as u64;
            tracing::info!(
                event_type = event.event_type(),
                item_id = %event.item_id(),
                sequence,
                "inventory transition committed"
            );
            if let Err(err) = self.bus.publish(EventEnvelope::committed(sequence, event.clone())) {
                tracing::error!(error = ?err, sequence, "failed to publish inventory event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use loadout_events::InMemoryEventBus;
    use loadout_inventory::{EquipSlot, Item};

    use super::*;
    use crate::snapshot_store::InMemorySnapshotStore;

    type TestSession = InventorySession<
        Arc<InMemorySnapshotStore>,
        Arc<InMemoryEventBus<EventEnvelope<InventoryEvent>>>,
    >;

    fn setup() -> TestSession {
        InventorySession::open(
            Arc::new(InMemorySnapshotStore::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn create_saves_and_publishes() {
        let mut session = setup();
        let sub = session.subscribe();

        let id = session
            .on_create_requested("Sword", Some("⚔"), None, Some("damage=7"))
            .unwrap();

        assert_eq!(session.snapshots().save_count(), 1);
        let delivered = sub.drain();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].sequence_number(), 1);
        assert_eq!(delivered[0].payload().item_id(), &id);
        assert_eq!(delivered[0].payload().event_type(), "inventory.item.created");
    }

    #[test]
    fn blank_name_is_rejected_without_side_effects() {
        let mut session = setup();
        let sub = session.subscribe();

        let err = session.on_create_requested("  ", None, None, None).unwrap_err();

        assert!(matches!(err, SessionError::Validation(_)));
        assert!(session.inventory().is_empty());
        assert_eq!(session.snapshots().save_count(), 0);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn no_op_gestures_neither_save_nor_publish() {
        let mut session = setup();
        let id = session.on_create_requested("Rope", None, None, None).unwrap();
        let sub = session.subscribe();

        assert_eq!(session.on_move_requested(id.as_str(), "storage"), None);
        assert_eq!(session.on_move_requested(id.as_str(), "backpack"), None);
        assert_eq!(session.on_move_requested("", "head"), None);
        assert!(!session.on_delete_requested("ghost"));

        assert_eq!(session.snapshots().save_count(), 1);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn move_and_delete_keep_saved_snapshot_current() {
        let mut session = setup();
        let sword = session.on_create_requested("Sword", None, None, None).unwrap();
        let shield = session.on_create_requested("Shield", None, None, None).unwrap();

        session.on_move_requested(sword.as_str(), "mainHand");
        session.on_move_requested(shield.as_str(), "offHand");
        assert!(session.on_delete_requested(shield.as_str()));

        let saved = session.snapshots().last_saved().unwrap();
        assert_eq!(saved, session.snapshot());
        assert_eq!(saved.slots.get(&EquipSlot::MainHand), Some(&Some(sword)));
        assert_eq!(saved.slots.get(&EquipSlot::OffHand), Some(&None));
        assert!(saved.storage_order.is_empty());
        assert_eq!(session.snapshots().save_count(), 5);
    }

    #[test]
    fn save_failures_do_not_block_requests() {
        let mut session = setup();
        session.snapshots().set_fail_saves(true);

        let id = session.on_create_requested("Torch", None, None, None).unwrap();
        let placement = session.on_move_requested(id.as_str(), "mainHand");

        assert_eq!(placement, Some(Placement::Equip { slot: EquipSlot::MainHand }));
        assert_eq!(
            session.inventory().slot_contents(EquipSlot::MainHand).map(Item::name),
            Some("Torch")
        );
        assert_eq!(session.snapshots().save_count(), 0);
    }

    #[test]
    fn items_loaded_with_padded_ids_stay_reachable() {
        let snapshot = InventorySnapshot::from_json(
            r#"{"items":[{"id":" a","name":"A"},{"id":"b","name":"B"}],"slots":{"head":" a"}}"#,
        );
        let mut session: TestSession = InventorySession::open(
            Arc::new(InMemorySnapshotStore::with_snapshot(snapshot)),
            Arc::new(InMemoryEventBus::new()),
        );

        assert_eq!(
            session.inventory().slot_contents(EquipSlot::Head).map(Item::name),
            Some("A")
        );
        assert_eq!(
            session.on_move_requested(" a ", "storage"),
            Some(Placement::Stow)
        );
        assert!(session.on_delete_requested(" a"));
        assert_eq!(session.inventory().len(), 1);
    }

    #[test]
    fn reopening_restores_the_saved_inventory() {
        let snapshots = Arc::new(InMemorySnapshotStore::new());
        let bus: Arc<InMemoryEventBus<EventEnvelope<InventoryEvent>>> =
            Arc::new(InMemoryEventBus::new());
        let mut session = InventorySession::open(snapshots.clone(), bus.clone());
        let a = session.on_create_requested("a", None, None, None).unwrap();
        session.on_create_requested("b", None, None, None).unwrap();
        session.on_move_requested(a.as_str(), "chest");
        drop(session);

        let reopened = InventorySession::open(snapshots, bus);

        assert_eq!(
            reopened.inventory().slot_contents(EquipSlot::Chest).map(Item::name),
            Some("a")
        );
        assert_eq!(
            reopened.inventory().stored_items().map(Item::name).collect::<Vec<_>>(),
            ["b"]
        );
    }
}
