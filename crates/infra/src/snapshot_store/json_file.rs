use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use loadout_inventory::InventorySnapshot;

use super::r#trait::SnapshotStore;

/// Snapshot store backed by a pretty-printed JSON file.
///
/// Saves go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "inventory".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> anyhow::Result<Option<InventorySnapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read snapshot at {:?}", self.path));
            }
        };
        Ok(Some(InventorySnapshot::from_json(&text)))
    }

    fn save(&self, snapshot: &InventorySnapshot) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create snapshot directory at {:?}", parent))?;
        }

        let json = snapshot
            .to_json_pretty()
            .context("failed to serialize inventory snapshot")?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .with_context(|| format!("failed to write snapshot to {:?}", temp))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("failed to move snapshot into place at {:?}", self.path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_inventory::{EquipSlot, InventoryStore, Item, NewItem};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("inventory.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_restores_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileSnapshotStore::new(dir.path().join("nested/saves/inventory.json"));

        let mut inventory = InventoryStore::new();
        let helm = inventory.create(NewItem::named("helm")).unwrap();
        inventory.create(NewItem::named("boots")).unwrap();
        inventory.resolve_move(&helm, "head");

        file.save(&inventory.to_snapshot()).unwrap();
        let loaded = InventoryStore::from_snapshot(file.load().unwrap().unwrap());

        assert_eq!(loaded.slot_contents(EquipSlot::Head).map(Item::name), Some("helm"));
        assert_eq!(
            loaded.stored_items().map(Item::name).collect::<Vec<_>>(),
            ["boots"]
        );
        assert!(!file.temp_path().exists());
    }

    #[test]
    fn corrupt_file_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{ this is not json").unwrap();

        let snapshot = JsonFileSnapshotStore::new(&path).load().unwrap().unwrap();
        assert_eq!(snapshot, InventorySnapshot::default());
    }
}
