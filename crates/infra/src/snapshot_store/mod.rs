//! Persistence boundary for inventory snapshots.
//!
//! The domain never reaches out to storage: the session hands a snapshot to a
//! `SnapshotStore` after each committed transition and asks it for one on
//! startup.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileSnapshotStore;
pub use r#trait::SnapshotStore;
