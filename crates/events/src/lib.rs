//! Domain events and their in-process distribution.
//!
//! Committed inventory transitions are described as events; display
//! collaborators subscribe to them to know when to re-read the projection.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
