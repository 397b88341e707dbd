//! Guest lookup across current stays and history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgeops_core::{AggregateRoot, UnitId};

use crate::unit::Unit;
use crate::unit_type::UnitType;

/// Whether a hit is a stay in progress or a finished one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    Current,
    Ended,
}

/// Leave date of a hit; still-running stays render as `"-"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LeaveDate {
    Ongoing,
    On(NaiveDate),
}

impl core::fmt::Display for LeaveDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LeaveDate::Ongoing => f.write_str("-"),
            LeaveDate::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<LeaveDate> for String {
    fn from(value: LeaveDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for LeaveDate {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "-" {
            return Ok(LeaveDate::Ongoing);
        }
        value.parse().map(LeaveDate::On)
    }
}

/// One matching stay, denormalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// `{unit}-{occupant}` for current guests, `{unit}-hist-{index}` for history.
    pub hit_id: String,
    pub client_name: String,
    pub unit_type: UnitType,
    pub entry_date: NaiveDate,
    pub leave_date: LeaveDate,
    pub status: StayStatus,
    pub unit_id: UnitId,
    pub unit_label: String,
    pub building: String,
    pub site: String,
}

impl SearchHit {
    fn new(
        unit: &Unit,
        hit_id: String,
        client_name: &str,
        unit_type: UnitType,
        entry_date: NaiveDate,
        leave_date: LeaveDate,
    ) -> Self {
        let status = match leave_date {
            LeaveDate::Ongoing => StayStatus::Current,
            LeaveDate::On(_) => StayStatus::Ended,
        };
        Self {
            hit_id,
            client_name: client_name.to_string(),
            unit_type,
            entry_date,
            leave_date,
            status,
            unit_id: unit.id().clone(),
            unit_label: unit.label().to_string(),
            building: unit.building_name().to_string(),
            site: unit.site().to_string(),
        }
    }
}

/// Case-insensitive substring search over one unit's guests.
///
/// Current occupants come first, then history (newest first). The query is
/// matched as typed, surrounding spaces included; an empty query matches
/// nothing.
pub fn search_unit(unit: &Unit, query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let is_match = |name: &str| name.to_lowercase().contains(&needle);

    let current = unit
        .occupants()
        .iter()
        .filter(|o| is_match(&o.name))
        .map(|o| {
            SearchHit::new(
                unit,
                format!("{}-{}", unit.id(), o.id),
                &o.name,
                o.unit_type,
                o.entry_date,
                LeaveDate::Ongoing,
            )
        });

    let past = unit
        .history()
        .iter()
        .enumerate()
        .filter(|(_, h)| is_match(&h.client_name))
        .map(|(idx, h)| {
            SearchHit::new(
                unit,
                format!("{}-hist-{idx}", unit.id()),
                &h.client_name,
                h.unit_type,
                h.entry_date,
                LeaveDate::On(h.leave_date),
            )
        });

    current.chain(past).collect()
}

/// [`search_unit`] across units, in iteration order.
pub fn search_units<'a, I>(units: I, query: &str) -> Vec<SearchHit>
where
    I: IntoIterator<Item = &'a Unit>,
{
    units
        .into_iter()
        .flat_map(|unit| search_unit(unit, query))
        .collect()
}
