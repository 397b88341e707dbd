//! Occupancy plans (`1/1` .. `1/4`).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lodgeops_core::{DomainError, ValueObject};

/// Occupancy plan booked by a guest.
///
/// The trailing digit of the code is the number of guests that may share the
/// unit under that plan. Check-in forms default to the four-bed plan.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "1/1")]
    Single,
    #[serde(rename = "1/2")]
    Double,
    #[serde(rename = "1/3")]
    Triple,
    #[default]
    #[serde(rename = "1/4")]
    Quad,
}

impl UnitType {
    pub const ALL: [UnitType; 4] = [
        UnitType::Single,
        UnitType::Double,
        UnitType::Triple,
        UnitType::Quad,
    ];

    /// Maximum number of guests sharing a unit under this plan.
    pub fn max_occupants(self) -> usize {
        match self {
            UnitType::Single => 1,
            UnitType::Double => 2,
            UnitType::Triple => 3,
            UnitType::Quad => 4,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            UnitType::Single => "1/1",
            UnitType::Double => "1/2",
            UnitType::Triple => "1/3",
            UnitType::Quad => "1/4",
        }
    }
}

impl ValueObject for UnitType {}

impl core::fmt::Display for UnitType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UnitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::ALL
            .into_iter()
            .find(|t| t.code() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown unit type {s:?}")))
    }
}
