//! Demo stays for a freshly generated roster.

use chrono::NaiveDate;

use lodgeops_core::{OccupantId, UnitId};
use lodgeops_events::EventBus;

use crate::error::OccupancyError;
use crate::manager::{OccupancyEnvelope, OccupancyManager, SYSTEM_ACTOR};
use crate::unit::{CheckIn, CheckOut, UnitCommand};
use crate::unit_type::UnitType;

/// Unit that receives the demo guests (`F-F-1`).
pub fn demo_unit_id() -> UnitId {
    UnitId::numbered("F-F-", 1)
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, OccupancyError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        OccupancyError::validation(format!("invalid demo date {year}-{month}-{day}"))
    })
}

/// Give the first Fnidaq unit one past stay and one current guest.
///
/// Goes through the normal command path (so subscribers see the events),
/// attributed to the system actor.
pub fn seed_demo_stays<B>(manager: &OccupancyManager<B>) -> Result<(), OccupancyError>
where
    B: EventBus<OccupancyEnvelope>,
{
    let unit_id = demo_unit_id();
    let now = manager.clock().now();

    let said = OccupantId::new();
    let steps = [
        UnitCommand::CheckIn(CheckIn {
            unit_id: unit_id.clone(),
            occupant_id: said,
            name: "Said Alami".to_string(),
            entry_date: ymd(2024, 12, 25)?,
            requested_type: UnitType::Triple,
            occurred_at: now,
        }),
        UnitCommand::CheckOut(CheckOut {
            unit_id: unit_id.clone(),
            occupant_id: said,
            leave_date: ymd(2024, 12, 30)?,
            occurred_at: now,
        }),
        UnitCommand::CheckIn(CheckIn {
            unit_id: unit_id.clone(),
            occupant_id: OccupantId::new(),
            name: "Karim Tazi".to_string(),
            entry_date: ymd(2025, 1, 1)?,
            requested_type: UnitType::Quad,
            occurred_at: now,
        }),
    ];

    for command in &steps {
        manager.dispatch_as(SYSTEM_ACTOR, command)?;
    }
    tracing::info!(unit_id = %unit_id, "seeded demo stays");
    Ok(())
}
