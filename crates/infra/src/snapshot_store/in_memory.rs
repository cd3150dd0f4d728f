use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::anyhow;

use loadout_inventory::InventorySnapshot;

use super::r#trait::SnapshotStore;

/// In-memory snapshot store.
///
/// Intended for tests/dev. Can be switched into a failing mode to exercise
/// save-error handling.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    saved: Mutex<Option<InventorySnapshot>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `snapshot` already saved.
    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            saved: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn last_saved(&self) -> Option<InventorySnapshot> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> anyhow::Result<Option<InventorySnapshot>> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| anyhow!("snapshot store lock poisoned"))?;
        Ok(saved.clone())
    }

    fn save(&self, snapshot: &InventorySnapshot) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated save failure"));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| anyhow!("snapshot store lock poisoned"))?;
        *saved = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
