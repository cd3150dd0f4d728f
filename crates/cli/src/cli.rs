use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "loadout", version, about = "Equip, stow and reorder inventory items")]
pub struct Cli {
    /// Inventory save file
    #[arg(long, short, env = "LOADOUT_FILE", default_value = "inventory.json")]
    pub file: PathBuf,

    /// Log as JSON instead of compact text
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Create an item; it is added to the end of storage
    Create {
        name: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Stats as `key=value` pairs separated by commas
        #[arg(long)]
        stats: Option<String>,
    },
    /// Drop an item onto a slot, the storage container, or another stored item
    Move { item: String, target: String },
    /// Delete an item from wherever it is
    Delete { item: String },
    /// Show equipped slots and storage
    Show,
    /// List slot ids and labels
    Slots,
}
