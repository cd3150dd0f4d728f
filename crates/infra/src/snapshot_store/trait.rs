use std::sync::Arc;

use loadout_inventory::InventorySnapshot;

/// Load/save hooks for the persisted inventory.
///
/// Failures are reported to the caller but never corrupt the in-memory
/// inventory: the session keeps operating on its last known state.
pub trait SnapshotStore {
    /// The last saved snapshot, or `None` if nothing was ever saved.
    fn load(&self) -> anyhow::Result<Option<InventorySnapshot>>;

    /// Persist `snapshot`, replacing whatever was saved before.
    fn save(&self, snapshot: &InventorySnapshot) -> anyhow::Result<()>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> anyhow::Result<Option<InventorySnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &InventorySnapshot) -> anyhow::Result<()> {
        (**self).save(snapshot)
    }
}
