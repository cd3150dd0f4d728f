//! Infrastructure layer: snapshot persistence and the request pipeline that
//! connects gesture input, the inventory aggregate and its collaborators.

pub mod session;
pub mod snapshot_store;


pub use session::{InventorySession, SessionError};
pub use snapshot_store::{InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotStore};
