//! Guests currently staying in a unit, and what is left of them once they leave.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgeops_core::{Entity, OccupantId, ValueObject};

use crate::unit_type::UnitType;

/// A guest currently staying in a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: OccupantId,
    pub name: String,
    pub entry_date: NaiveDate,
    /// Always the cohort plan of the unit at check-in time.
    pub unit_type: UnitType,
}

impl Entity for Occupant {
    type Id = OccupantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Occupant {
    /// Snapshot this stay as it ends on `leave_date`.
    pub fn to_history(&self, leave_date: NaiveDate) -> HistoryRecord {
        HistoryRecord {
            client_name: self.name.clone(),
            entry_date: self.entry_date,
            leave_date,
            unit_type: self.unit_type,
        }
    }
}

/// Immutable record of a finished stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub client_name: String,
    pub entry_date: NaiveDate,
    pub leave_date: NaiveDate,
    pub unit_type: UnitType,
}

impl ValueObject for HistoryRecord {}
