//! Occupancy domain module.
//!
//! Lodging units, their current guests and their stay history, with the
//! capacity rules for shared occupancy plans. Decision logic is pure
//! (`Unit` is an aggregate); `OccupancyManager` owns the roster for a session
//! and publishes what changed.

pub mod clock;
pub mod demo;
pub mod error;
pub mod manager;
pub mod occupant;
pub mod report;
pub mod roster;
pub mod search;
pub mod unit;
pub mod unit_type;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::OccupancyError;
pub use manager::{AGGREGATE_TYPE, OccupancyEnvelope, OccupancyManager, SYSTEM_ACTOR};
pub use occupant::{HistoryRecord, Occupant};
pub use report::{Arrival, OccupancyStats};
pub use roster::{SITES, SiteScope, generate_units};
pub use search::{LeaveDate, SearchHit, StayStatus, search_units};
pub use unit::{
    CheckIn, CheckOut, OccupancyEvent, OccupantCheckedIn, OccupantCheckedOut, Unit, UnitCommand,
};
pub use unit_type::UnitType;
