use serde::{Deserialize, Serialize};

use lodgeops_core::{EventId, UnitId};

/// An event plus the metadata consumers need to order and attribute it.
///
/// `sequence_number` is the unit's version right after the event was applied,
/// so it increases by one per event within a unit stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    unit_id: UnitId,
    aggregate_type: String,
    sequence_number: u64,
    /// Who performed the action (staff username, `"system"` for seeding).
    actor: String,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: EventId,
        unit_id: UnitId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        actor: impl Into<String>,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            unit_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            actor: actor.into(),
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
