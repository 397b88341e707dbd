//! Entity trait: things that keep their identity while their attributes change.

/// Identity accessor for domain entities.
///
/// A guest staying in a unit is an entity: two guests with the same name are
/// still two different people, told apart by their id.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
