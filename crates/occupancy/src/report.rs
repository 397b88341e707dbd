//! Dashboard read models: occupancy rate and arrivals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgeops_core::{AggregateRoot, UnitId};

use crate::occupant::Occupant;
use crate::unit::Unit;

/// Occupied-vs-total counts for a set of units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyStats {
    pub total_units: usize,
    pub occupied_units: usize,
}

impl OccupancyStats {
    pub fn from_units<'a, I>(units: I) -> Self
    where
        I: IntoIterator<Item = &'a Unit>,
    {
        units.into_iter().fold(
            OccupancyStats {
                total_units: 0,
                occupied_units: 0,
            },
            |mut acc, unit| {
                acc.total_units += 1;
                if unit.is_occupied() {
                    acc.occupied_units += 1;
                }
                acc
            },
        )
    }

    pub fn free_units(&self) -> usize {
        self.total_units - self.occupied_units
    }

    /// Occupied share in percent, rounded half up; 0 for an empty set.
    pub fn rate_percent(&self) -> usize {
        if self.total_units == 0 {
            return 0;
        }
        (self.occupied_units * 200 + self.total_units) / (self.total_units * 2)
    }
}

/// A guest who arrived on a given day, with where they are staying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    pub unit_id: UnitId,
    pub unit_label: String,
    pub site: String,
    pub occupant: Occupant,
}

/// Current guests of `unit` whose entry date is `date`.
pub fn arrivals_in(unit: &Unit, date: NaiveDate) -> impl Iterator<Item = Arrival> + '_ {
    unit.occupants()
        .iter()
        .filter(move |o| o.entry_date == date)
        .map(move |o| Arrival {
            unit_id: unit.id().clone(),
            unit_label: unit.label().to_string(),
            site: unit.site().to_string(),
            occupant: o.clone(),
        })
}
