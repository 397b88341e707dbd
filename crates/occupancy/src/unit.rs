use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lodgeops_core::{Aggregate, AggregateRoot, OccupantId, UnitId};
use lodgeops_events::Event;

use crate::error::OccupancyError;
use crate::occupant::{HistoryRecord, Occupant};
use crate::unit_type::UnitType;

/// Aggregate root: a lodgeable apartment.
///
/// Descriptive fields are fixed when the roster is generated. Only
/// `occupants` and `history` change, and only through [`Aggregate::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    label: String,
    building_name: String,
    site: String,
    /// Displayed bed count. The enforced limit comes from the cohort plan.
    capacity_hint: usize,
    occupants: Vec<Occupant>,
    /// Newest first.
    history: Vec<HistoryRecord>,
    version: u64,
}

impl Unit {
    pub fn new(
        id: UnitId,
        label: impl Into<String>,
        building_name: impl Into<String>,
        site: impl Into<String>,
        capacity_hint: usize,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            building_name: building_name.into(),
            site: site.into(),
            capacity_hint,
            occupants: Vec::new(),
            history: Vec::new(),
            version: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn building_name(&self) -> &str {
        &self.building_name
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    /// Current guests in check-in order.
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Finished stays, newest first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn occupant(&self, occupant_id: OccupantId) -> Option<&Occupant> {
        self.occupants.iter().find(|o| o.id == occupant_id)
    }

    /// Plan shared by everyone currently in the unit.
    ///
    /// Derived from the earliest current guest; `None` when the unit is empty.
    pub fn cohort_type(&self) -> Option<UnitType> {
        self.occupants.first().map(|o| o.unit_type)
    }

    /// Limit enforced for the current cohort, `None` when the unit is empty.
    pub fn effective_capacity(&self) -> Option<usize> {
        self.cohort_type().map(UnitType::max_occupants)
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Whether the displayed bed count still leaves room (drives the
    /// "new check-in" affordance; the cohort limit is checked on check-in).
    pub fn has_vacancy(&self) -> bool {
        self.occupants.len() < self.capacity_hint
    }
}

impl AggregateRoot for Unit {
    type Id = UnitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CheckIn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub unit_id: UnitId,
    pub occupant_id: OccupantId,
    pub name: String,
    pub entry_date: NaiveDate,
    /// Ignored when the unit already has a cohort.
    pub requested_type: UnitType,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CheckOut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOut {
    pub unit_id: UnitId,
    pub occupant_id: OccupantId,
    pub leave_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitCommand {
    CheckIn(CheckIn),
    CheckOut(CheckOut),
}

impl UnitCommand {
    pub fn unit_id(&self) -> &UnitId {
        match self {
            UnitCommand::CheckIn(cmd) => &cmd.unit_id,
            UnitCommand::CheckOut(cmd) => &cmd.unit_id,
        }
    }
}

/// Event: OccupantCheckedIn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantCheckedIn {
    pub unit_id: UnitId,
    /// Carries the resolved cohort plan, not the requested one.
    pub occupant: Occupant,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OccupantCheckedOut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantCheckedOut {
    pub unit_id: UnitId,
    pub occupant_id: OccupantId,
    pub record: HistoryRecord,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupancyEvent {
    OccupantCheckedIn(OccupantCheckedIn),
    OccupantCheckedOut(OccupantCheckedOut),
}

impl Event for OccupancyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OccupancyEvent::OccupantCheckedIn(_) => "occupancy.occupant.checked_in",
            OccupancyEvent::OccupantCheckedOut(_) => "occupancy.occupant.checked_out",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OccupancyEvent::OccupantCheckedIn(e) => e.occurred_at,
            OccupancyEvent::OccupantCheckedOut(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Unit {
    type Command = UnitCommand;
    type Event = OccupancyEvent;
    type Error = OccupancyError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OccupancyEvent::OccupantCheckedIn(e) => {
                self.occupants.push(e.occupant.clone());
            }
            OccupancyEvent::OccupantCheckedOut(e) => {
                self.occupants.retain(|o| o.id != e.occupant_id);
                self.history.insert(0, e.record.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            UnitCommand::CheckIn(cmd) => self.handle_check_in(cmd),
            UnitCommand::CheckOut(cmd) => self.handle_check_out(cmd),
        }
    }
}

impl Unit {
    fn ensure_unit_id(&self, unit_id: &UnitId) -> Result<(), OccupancyError> {
        if &self.id != unit_id {
            return Err(OccupancyError::UnitNotFound(unit_id.clone()));
        }
        Ok(())
    }

    fn handle_check_in(&self, cmd: &CheckIn) -> Result<Vec<OccupancyEvent>, OccupancyError> {
        self.ensure_unit_id(&cmd.unit_id)?;

        if cmd.name.trim().is_empty() {
            return Err(OccupancyError::validation("name cannot be empty"));
        }
        if self.occupant(cmd.occupant_id).is_some() {
            return Err(OccupancyError::validation(format!(
                "occupant {} is already checked in",
                cmd.occupant_id
            )));
        }

        let unit_type = self.cohort_type().unwrap_or(cmd.requested_type);
        let max_occupants = unit_type.max_occupants();
        if self.occupants.len() >= max_occupants {
            return Err(OccupancyError::Capacity {
                max_occupants,
                unit_type,
            });
        }

        Ok(vec![OccupancyEvent::OccupantCheckedIn(OccupantCheckedIn {
            unit_id: cmd.unit_id.clone(),
            occupant: Occupant {
                id: cmd.occupant_id,
                name: cmd.name.clone(),
                entry_date: cmd.entry_date,
                unit_type,
            },
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_check_out(&self, cmd: &CheckOut) -> Result<Vec<OccupancyEvent>, OccupancyError> {
        self.ensure_unit_id(&cmd.unit_id)?;

        let occupant = self
            .occupant(cmd.occupant_id)
            .ok_or_else(|| OccupancyError::OccupantNotFound {
                unit_id: cmd.unit_id.clone(),
                occupant_id: cmd.occupant_id,
            })?;

        Ok(vec![OccupancyEvent::OccupantCheckedOut(OccupantCheckedOut {
            unit_id: cmd.unit_id.clone(),
            occupant_id: cmd.occupant_id,
            record: occupant.to_history(cmd.leave_date),
            occurred_at: cmd.occurred_at,
        })])
    }
}
