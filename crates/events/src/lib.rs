//! Event plumbing for occupancy changes.
//!
//! Aggregates decide events; this crate wraps them in envelopes, fans them out
//! in-process, and feeds read models built from them.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod projection;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use projection::Projection;
