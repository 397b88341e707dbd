//! Aggregate contract for state that changes through decided events.

/// Identity and version of a consistency boundary.
///
/// A lodging unit is the boundary for occupancy: every check-in or check-out
/// reads and writes exactly one unit.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of events applied since the aggregate was built.
    fn version(&self) -> u64;
}

/// Decide/apply split for aggregate behaviour.
///
/// - `handle(&self, cmd)` validates a command against current state and
///   returns the events it would produce. It must not mutate.
/// - `apply(&mut self, event)` folds one event into state and bumps the
///   version. It must not fail: every event reaching it was already decided.
///
/// Neither side performs IO. Callers that need "decide then apply" in one
/// step use `lodgeops_events::execute`.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn apply(&mut self, event: &Self::Event);

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}
