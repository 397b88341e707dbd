//! Value object marker.

/// Marker for immutable values compared by their attributes.
///
/// Occupancy plans and checkout snapshots are values: once built they never
/// change, and two with identical fields are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
