//! `lodgeops-core`: domain building blocks shared by the lodging crates.
//!
//! Pure domain primitives only: identifiers, the aggregate contract and the
//! shared error model. No storage, no clocks, no IO.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::DomainError;
pub use id::{EventId, OccupantId, UnitId};
pub use value_object::ValueObject;
