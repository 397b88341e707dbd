//! Occupancy manager: the session-scoped owner of the unit roster.
//!
//! Each unit sits behind its own mutex, so a check-in or check-out is one
//! atomic read-modify-write of one unit even when the manager is shared
//! across threads. Reads lock units one at a time and return owned
//! snapshots; they never observe a half-applied command.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use lodgeops_core::{AggregateRoot, EventId, OccupantId, UnitId};
use lodgeops_events::{Event, EventBus, EventEnvelope, execute};

use crate::clock::Clock;
use crate::error::OccupancyError;
use crate::occupant::Occupant;
use crate::report::{Arrival, OccupancyStats, arrivals_in};
use crate::roster::{SiteScope, generate_units};
use crate::search::{SearchHit, search_unit};
use crate::unit::{CheckIn, CheckOut, OccupancyEvent, Unit, UnitCommand};
use crate::unit_type::UnitType;

/// Aggregate type stamped on every occupancy envelope.
pub const AGGREGATE_TYPE: &str = "occupancy.unit";

/// Actor recorded when no staff member is attached to the manager.
pub const SYSTEM_ACTOR: &str = "system";

pub type OccupancyEnvelope = EventEnvelope<OccupancyEvent>;

#[derive(Debug)]
pub struct OccupancyManager<B> {
    slots: Vec<Mutex<Unit>>,
    index: HashMap<UnitId, usize>,
    bus: B,
    clock: Arc<dyn Clock>,
    actor: String,
}

fn lock(slot: &Mutex<Unit>) -> MutexGuard<'_, Unit> {
    // Units only change inside `apply`, after `handle` accepted the command,
    // so a poisoned guard still holds a consistent unit.
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<B> OccupancyManager<B> {
    /// Take ownership of `units`. If two units share an id, the first wins and
    /// later ones are dropped.
    pub fn new(units: Vec<Unit>, bus: B, clock: Arc<dyn Clock>) -> Self {
        let mut index = HashMap::with_capacity(units.len());
        let mut slots = Vec::with_capacity(units.len());
        for unit in units {
            match index.entry(unit.id().clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(slots.len());
                    slots.push(Mutex::new(unit));
                }
                Entry::Occupied(entry) => {
                    tracing::warn!(unit_id = %entry.key(), "duplicate unit id dropped from roster");
                }
            }
        }
        Self {
            slots,
            index,
            bus,
            clock,
            actor: SYSTEM_ACTOR.to_string(),
        }
    }

    /// Manager over the standard roster, all units empty.
    pub fn with_roster(bus: B, clock: Arc<dyn Clock>) -> Self {
        Self::new(generate_units(), bus, clock)
    }

    /// Attribute subsequent changes to `actor` (the logged-in staff member).
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, unit_id: &UnitId) -> Result<&Mutex<Unit>, OccupancyError> {
        self.index
            .get(unit_id)
            .and_then(|&i| self.slots.get(i))
            .ok_or_else(|| OccupancyError::UnitNotFound(unit_id.clone()))
    }

    fn collect_units<T>(&self, mut f: impl FnMut(&Unit) -> Option<T>) -> Vec<T> {
        self.slots.iter().filter_map(|slot| f(&lock(slot))).collect()
    }

    /// Snapshot of every unit in roster order.
    pub fn units(&self) -> Vec<Unit> {
        self.collect_units(|unit| Some(unit.clone()))
    }

    pub fn unit(&self, unit_id: &UnitId) -> Result<Unit, OccupancyError> {
        Ok(lock(self.slot(unit_id)?).clone())
    }

    pub fn units_in_scope(&self, scope: &SiteScope) -> Vec<Unit> {
        self.collect_units(|unit| scope.includes(unit).then(|| unit.clone()))
    }

    /// Units with at least one guest, for laundry and meal-voucher lookups.
    pub fn occupied_units(&self) -> Vec<Unit> {
        self.collect_units(|unit| unit.is_occupied().then(|| unit.clone()))
    }

    /// Locate a current guest anywhere in the roster.
    pub fn find_occupant(&self, occupant_id: OccupantId) -> Option<(Unit, Occupant)> {
        self.slots.iter().find_map(|slot| {
            let unit = lock(slot);
            let occupant = unit.occupant(occupant_id)?.clone();
            Some((unit.clone(), occupant))
        })
    }

    pub fn occupancy_stats(&self, scope: &SiteScope) -> OccupancyStats {
        OccupancyStats::from_units(&self.units_in_scope(scope))
    }

    /// Current guests who checked in with `date` as their entry date.
    pub fn arrivals_on(&self, date: NaiveDate) -> Vec<Arrival> {
        self.slots
            .iter()
            .flat_map(|slot| arrivals_in(&lock(slot), date).collect::<Vec<_>>())
            .collect()
    }

    /// Guests (current and past) whose name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return Vec::new();
        }
        let hits: Vec<SearchHit> = self
            .slots
            .iter()
            .flat_map(|slot| search_unit(&lock(slot), query))
            .collect();
        tracing::debug!(query, hits = hits.len(), "guest search");
        hits
    }
}

impl<B> OccupancyManager<B>
where
    B: EventBus<OccupancyEnvelope>,
{
    /// Check a guest into `unit_id`.
    ///
    /// `requested_type` only matters for an empty unit; otherwise the guest
    /// joins the existing cohort plan.
    pub fn check_in(
        &self,
        unit_id: &UnitId,
        name: &str,
        entry_date: NaiveDate,
        requested_type: UnitType,
    ) -> Result<Unit, OccupancyError> {
        let occupant_id = OccupantId::new();
        let command = UnitCommand::CheckIn(CheckIn {
            unit_id: unit_id.clone(),
            occupant_id,
            name: name.to_string(),
            entry_date,
            requested_type,
            occurred_at: self.clock.now(),
        });

        let unit = self.dispatch(&command)?;
        tracing::info!(
            unit_id = %unit_id,
            occupant_id = %occupant_id,
            unit_type = %unit.cohort_type().unwrap_or(requested_type),
            occupants = unit.occupants().len(),
            "occupant checked in"
        );
        Ok(unit)
    }

    /// Check a guest out of `unit_id`, recording today as the leave date.
    pub fn check_out(
        &self,
        unit_id: &UnitId,
        occupant_id: OccupantId,
    ) -> Result<Unit, OccupancyError> {
        let command = UnitCommand::CheckOut(CheckOut {
            unit_id: unit_id.clone(),
            occupant_id,
            leave_date: self.clock.today(),
            occurred_at: self.clock.now(),
        });

        let unit = self.dispatch(&command)?;
        tracing::info!(
            unit_id = %unit_id,
            occupant_id = %occupant_id,
            occupants = unit.occupants().len(),
            "occupant checked out"
        );
        Ok(unit)
    }

    /// Run `command` against its unit as the manager's actor.
    pub fn dispatch(&self, command: &UnitCommand) -> Result<Unit, OccupancyError> {
        self.dispatch_as(&self.actor, command)
    }

    /// Run `command` against its unit, attributing the change to `actor`.
    ///
    /// The unit stays locked from decision through publication, so envelopes
    /// for one unit reach subscribers in sequence order. Publish failures are
    /// logged; the unit change stands.
    pub fn dispatch_as(&self, actor: &str, command: &UnitCommand) -> Result<Unit, OccupancyError> {
        let unit_id = command.unit_id();
        let mut unit = lock(self.slot(unit_id)?);
        let base_version = unit.version();

        let events = match execute(&mut *unit, command) {
            Ok(events) => events,
            Err(err) => {
                if err.is_business_rejection() {
                    tracing::warn!(%unit_id, error = %err, "occupancy change rejected");
                } else {
                    tracing::debug!(%unit_id, error = %err, "invalid occupancy command");
                }
                return Err(err);
            }
        };

        for (offset, event) in (1u64..).zip(events) {
            self.publish(actor, unit.id(), base_version + offset, event);
        }

        Ok(unit.clone())
    }

    fn publish(&self, actor: &str, unit_id: &UnitId, sequence_number: u64, event: OccupancyEvent) {
        let event_type = event.event_type();
        let envelope = EventEnvelope::new(
            EventId::new(),
            unit_id.clone(),
            AGGREGATE_TYPE,
            sequence_number,
            actor,
            event,
        );
        if let Err(err) = self.bus.publish(envelope) {
            tracing::error!(
                %unit_id,
                event_type,
                error = ?err,
                "failed to publish occupancy event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgeops_events::InMemoryEventBus;

    use crate::clock::FixedClock;
    use crate::search::{LeaveDate, StayStatus};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn today() -> NaiveDate {
        date("2025-01-10")
    }

    fn test_manager() -> OccupancyManager<Arc<InMemoryEventBus<OccupancyEnvelope>>> {
        OccupancyManager::with_roster(
            Arc::new(InMemoryEventBus::new()),
            Arc::new(FixedClock::on(today())),
        )
        .with_actor("61")
    }

    fn u1() -> UnitId {
        "F-F-1".parse().unwrap()
    }

    #[test]
    fn scenario_check_in_pins_type_and_enforces_capacity() {
        let manager = test_manager();

        // 1. Empty unit takes the requested plan.
        let unit = manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        assert_eq!(unit.occupants().len(), 1);
        assert_eq!(unit.occupants()[0].name, "Karim");
        assert_eq!(unit.occupants()[0].unit_type, UnitType::Quad);

        // 2. Newcomer joins the 1/4 cohort despite asking for 1/1.
        let unit = manager
            .check_in(&u1(), "Ali", date("2025-01-02"), UnitType::Single)
            .unwrap();
        assert_eq!(unit.occupants()[1].unit_type, UnitType::Quad);

        // 3. Fill up, then the fifth guest bounces.
        manager
            .check_in(&u1(), "Sara", date("2025-01-02"), UnitType::Quad)
            .unwrap();
        manager
            .check_in(&u1(), "Youssef", date("2025-01-03"), UnitType::Double)
            .unwrap();
        let err = manager
            .check_in(&u1(), "Omar", date("2025-01-03"), UnitType::Quad)
            .unwrap_err();
        assert_eq!(
            err,
            OccupancyError::Capacity {
                max_occupants: 4,
                unit_type: UnitType::Quad
            }
        );
        assert_eq!(manager.unit(&u1()).unwrap().occupants().len(), 4);
    }

    #[test]
    fn scenario_check_out_and_search() {
        let manager = test_manager();
        let unit = manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        let karim = unit.occupants()[0].id;
        for name in ["Ali", "Sara", "Youssef"] {
            manager
                .check_in(&u1(), name, date("2025-01-02"), UnitType::Quad)
                .unwrap();
        }

        // 5 (before): Karim is a current guest.
        let hits = manager.search("kar");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, StayStatus::Current);
        assert_eq!(hits[0].leave_date.to_string(), "-");

        // 4. Checkout leaves three guests and one history record.
        let unit = manager.check_out(&u1(), karim).unwrap();
        assert_eq!(unit.occupants().len(), 3);
        assert!(unit.occupant(karim).is_none());
        assert_eq!(unit.history().len(), 1);
        let record = &unit.history()[0];
        assert_eq!(record.client_name, "Karim");
        assert_eq!(record.entry_date, date("2025-01-01"));
        assert_eq!(record.leave_date, today());
        assert_eq!(record.unit_type, UnitType::Quad);

        // 5 (after): the same query finds the ended stay.
        let hits = manager.search("kar");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, StayStatus::Ended);
        assert_eq!(hits[0].leave_date, LeaveDate::On(today()));
        assert_eq!(hits[0].unit_label, "N°1");
        assert_eq!(hits[0].site, "Fnidaq");
    }

    #[test]
    fn round_trip_leaves_only_history() {
        let manager = test_manager();
        let unit_id: UnitId = "M-12".parse().unwrap();
        let unit = manager
            .check_in(&unit_id, "Nadia", date("2025-01-08"), UnitType::Double)
            .unwrap();
        let nadia = unit.occupants()[0].clone();

        let unit = manager.check_out(&unit_id, nadia.id).unwrap();
        assert!(unit.occupants().is_empty());
        assert_eq!(unit.history(), &[nadia.to_history(today())]);
    }

    #[test]
    fn second_checkout_of_same_guest_is_not_found() {
        let manager = test_manager();
        let unit = manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        let karim = unit.occupants()[0].id;
        manager.check_out(&u1(), karim).unwrap();

        let err = manager.check_out(&u1(), karim).unwrap_err();
        assert!(matches!(err, OccupancyError::OccupantNotFound { .. }));
        assert_eq!(manager.unit(&u1()).unwrap().history().len(), 1);
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let manager = test_manager();
        let ghost: UnitId = "Z-99".parse().unwrap();
        let err = manager
            .check_in(&ghost, "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap_err();
        assert_eq!(err, OccupancyError::UnitNotFound(ghost.clone()));
        assert!(manager.unit(&ghost).is_err());
    }

    #[test]
    fn duplicate_unit_ids_keep_only_the_first_unit() {
        let first = Unit::new(u1(), "N°1", "Imm. Fnidaq", "Fnidaq", 4);
        let copy = Unit::new(u1(), "Copy", "Imm. Fnidaq", "Fnidaq", 4);
        let manager = OccupancyManager::new(
            vec![first, copy],
            Arc::new(InMemoryEventBus::<OccupancyEnvelope>::new()),
            Arc::new(FixedClock::on(today())),
        );

        assert_eq!(manager.len(), 1);
        let labels: Vec<String> = manager
            .units()
            .iter()
            .map(|u| u.label().to_string())
            .collect();
        assert_eq!(labels, vec!["N°1"]);

        manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        let hits = manager.search("karim");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].unit_label, "N°1");
    }

    #[test]
    fn empty_search_returns_nothing_even_with_guests() {
        let manager = test_manager();
        manager
            .check_in(&u1(), "Karim Tazi", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        assert!(manager.search("").is_empty());
        assert_eq!(manager.search(" ").len(), 1);
    }

    #[test]
    fn projections_reflect_occupancy() {
        let manager = test_manager();
        let mdik: UnitId = "M-3".parse().unwrap();
        manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        let unit = manager
            .check_in(&mdik, "Amal", today(), UnitType::Double)
            .unwrap();
        let amal = unit.occupants()[0].id;

        let occupied: Vec<String> = manager
            .occupied_units()
            .iter()
            .map(|u| u.id().to_string())
            .collect();
        assert_eq!(occupied, vec!["F-F-1", "M-3"]);

        let (unit, occupant) = manager.find_occupant(amal).unwrap();
        assert_eq!(unit.id(), &mdik);
        assert_eq!(occupant.name, "Amal");
        assert!(manager.find_occupant(OccupantId::new()).is_none());

        let arrivals = manager.arrivals_on(today());
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].unit_label, "M-3");

        let all = manager.occupancy_stats(&SiteScope::All);
        assert_eq!((all.occupied_units, all.total_units), (2, 67));
        assert_eq!(all.rate_percent(), 3);

        let site = manager.occupancy_stats(&SiteScope::site("M'dik"));
        assert_eq!((site.occupied_units, site.total_units), (1, 12));
        assert_eq!(manager.units_in_scope(&SiteScope::site("Al Hoceima")).len(), 8);
    }

    #[test]
    fn envelopes_are_sequenced_per_unit_and_attributed() {
        let manager = test_manager();
        let subscription = manager.bus().subscribe();

        let unit = manager
            .check_in(&u1(), "Karim", date("2025-01-01"), UnitType::Quad)
            .unwrap();
        let karim = unit.occupants()[0].id;
        manager.check_out(&u1(), karim).unwrap();
        let _ = manager.check_in(&u1(), "", date("2025-01-01"), UnitType::Quad);

        let envelopes = subscription.drain();
        assert_eq!(envelopes.len(), 2);
        let seqs: Vec<u64> = envelopes.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert!(envelopes.iter().all(|e| e.actor() == "61"));
        assert!(envelopes.iter().all(|e| e.aggregate_type() == AGGREGATE_TYPE));
        assert_eq!(
            envelopes[1].payload().event_type(),
            "occupancy.occupant.checked_out"
        );
    }

    #[test]
    fn concurrent_check_ins_never_overfill_a_unit() {
        let manager = Arc::new(test_manager());
        let unit_id: UnitId = "F-B-14".parse().unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let manager = Arc::clone(&manager);
                let unit_id = unit_id.clone();
                std::thread::spawn(move || {
                    let name = format!("Guest {i}");
                    manager
                        .check_in(&unit_id, &name, date("2025-01-05"), UnitType::Triple)
                        .is_ok()
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 3);
        assert_eq!(manager.unit(&unit_id).unwrap().occupants().len(), 3);
    }
}
