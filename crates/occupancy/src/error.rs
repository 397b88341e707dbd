//! Occupancy failures.

use thiserror::Error;

use lodgeops_core::{DomainError, OccupantId, UnitId};

use crate::unit_type::UnitType;

/// Why an occupancy operation was refused.
///
/// Every variant leaves the unit exactly as it was. `Capacity` and
/// `OccupantNotFound` are expected business outcomes that callers surface
/// to staff; `UnitNotFound` and `Validation` are rejections of bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    /// The unit already holds as many guests as its cohort plan allows.
    #[error("unit is full ({max_occupants} max for {unit_type})")]
    Capacity {
        max_occupants: usize,
        unit_type: UnitType,
    },

    /// The guest is not (or no longer) staying in the unit.
    #[error("occupant {occupant_id} is not staying in unit {unit_id}")]
    OccupantNotFound {
        unit_id: UnitId,
        occupant_id: OccupantId,
    },

    #[error("unknown unit {0}")]
    UnitNotFound(UnitId),

    #[error("validation failed: {0}")]
    Validation(String),
}

impl OccupancyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this is a business outcome rather than rejected input.
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            OccupancyError::Capacity { .. } | OccupancyError::OccupantNotFound { .. }
        )
    }
}

impl From<OccupancyError> for DomainError {
    fn from(value: OccupancyError) -> Self {
        match value {
            OccupancyError::Capacity { .. } => DomainError::invariant(value.to_string()),
            OccupancyError::OccupantNotFound { .. } | OccupancyError::UnitNotFound(_) => {
                DomainError::not_found(value.to_string())
            }
            OccupancyError::Validation(msg) => DomainError::Validation(msg),
        }
    }
}
