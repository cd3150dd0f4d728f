//! Plain-text rendering of the inventory projection.

use std::fmt::Write;

use loadout_core::Entity;
use loadout_inventory::{EquipSlot, InventoryStore, Item, STORAGE_CONTAINER_ID, format_stats};

fn item_line(item: &Item) -> String {
    let mut line = String::new();
    if let Some(icon) = item.icon() {
        let _ = write!(line, "{icon} ");
    }
    let _ = write!(line, "{} [{}]", item.name(), item.id());
    if !item.stats().is_empty() {
        let _ = write!(line, " {{{}}}", format_stats(item.stats()));
    }
    if let Some(description) = item.description() {
        let _ = write!(line, " - {description}");
    }
    line
}

pub fn inventory(store: &InventoryStore) -> String {
    let mut out = String::from("Equipped:\n");
    for (slot, item) in store.equipped() {
        let content = item.map(item_line).unwrap_or_else(|| "(empty)".to_string());
        let _ = writeln!(out, "  {:<9} {content}", slot.label());
    }

    let _ = writeln!(out, "Storage ({}):", store.storage_order().len());
    for (index, item) in store.stored_items().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", index + 1, item_line(item));
    }
    out
}

pub fn slots() -> String {
    let mut out = String::new();
    for slot in EquipSlot::ALL {
        let _ = writeln!(out, "{:<9} {}", slot.id(), slot.label());
    }
    let _ = writeln!(out, "{STORAGE_CONTAINER_ID:<9} Storage");
    out
}
