use chrono::{DateTime, Utc};

/// A fact recorded by an aggregate.
///
/// Events are immutable, versioned for schema evolution, and only ever
/// appended.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted name, e.g. `"occupancy.occupant.checked_in"`.
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// Business time of the fact.
    fn occurred_at(&self) -> DateTime<Utc>;
}
