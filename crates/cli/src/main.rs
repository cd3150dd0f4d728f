use anyhow::bail;
use clap::Parser;

use loadout_events::{EventEnvelope, InMemoryEventBus};
use loadout_infra::{InventorySession, JsonFileSnapshotStore, SessionError};
use loadout_inventory::InventoryEvent;
use loadout_observability::LogFormat;

mod cli;
mod render;

use cli::{Cli, Cmd};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    loadout_observability::init(format, "warn");

    let bus: InMemoryEventBus<EventEnvelope<InventoryEvent>> = InMemoryEventBus::new();
    let mut session = InventorySession::open(JsonFileSnapshotStore::new(&cli.file), bus);

    match cli.cmd {
        Cmd::Create {
            name,
            icon,
            description,
            stats,
        } => {
            match session.on_create_requested(
                &name,
                icon.as_deref(),
                description.as_deref(),
                stats.as_deref(),
            ) {
                Ok(item_id) => println!("{item_id}"),
                Err(SessionError::Validation(msg)) => bail!("cannot create item: {msg}"),
                Err(err) => return Err(err.into()),
            }
        }
        Cmd::Move { item, target } => match session.on_move_requested(&item, &target) {
            Some(placement) => println!("{placement}"),
            None => println!("nothing to do"),
        },
        Cmd::Delete { item } => {
            if session.on_delete_requested(&item) {
                println!("deleted {item}");
            } else {
                println!("nothing to do");
            }
        }
        Cmd::Show => print!("{}", render::inventory(session.inventory())),
        Cmd::Slots => print!("{}", render::slots()),
    }

    Ok(())
}
