use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use proptest::prelude::*;

use lodgeops_core::UnitId;
use lodgeops_infra::{AppConfig, Session, Severity};
use lodgeops_occupancy::{FixedClock, OccupancyError, SiteScope, StayStatus, UnitType};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn start(config: &AppConfig, actor: &str) -> Session {
    Session::start_with_clock(config, actor, Arc::new(FixedClock::on(date("2025-01-10")))).unwrap()
}

#[test]
fn demo_session_shows_seeded_stays_in_feed() {
    let config = AppConfig {
        seed_demo: true,
        ..AppConfig::default()
    };
    let session = start(&config, "1");

    assert_eq!(session.activity().len(), 3);
    assert!(session.activity().iter().all(|e| e.actor == "system"));
    assert_eq!(session.activity()[0].action, "Check-in");
    assert_eq!(session.activity()[1].severity, Severity::Warning);

    let hits = session.manager().search("tazi");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].status, StayStatus::Current);

    let stats = session.stats();
    assert_eq!((stats.occupied_units, stats.total_units), (1, 67));
    session.end();
}

#[test]
fn site_staff_only_see_their_site() {
    let config = AppConfig {
        site: Some("Al Hoceima".to_string()),
        ..AppConfig::default()
    };
    let session = start(&config, "63");

    assert_eq!(session.scope(), &SiteScope::site("Al Hoceima"));
    let units = session.visible_units();
    assert_eq!(units.len(), 8);
    assert!(units.iter().all(|u| u.site() == "Al Hoceima"));
}

#[test]
fn staff_actions_are_attributed_in_feed() {
    let mut session = start(&AppConfig::default(), "61");
    let unit_id: UnitId = "F-B-2".parse().unwrap();

    let unit = session
        .manager()
        .check_in(&unit_id, "Amal", date("2025-01-09"), UnitType::Double)
        .unwrap();
    let amal = unit.occupants()[0].id;
    session.manager().check_out(&unit_id, amal).unwrap();

    let feed = session.refresh_activity();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].action, "Check-out");
    assert_eq!(feed[0].actor, "61");
    assert_eq!(feed[1].target, "Amal (1/2) in F-B-2");

    let unit = session.manager().unit(&unit_id).unwrap();
    assert_eq!(unit.history()[0].leave_date, date("2025-01-10"));
}

#[test]
fn shared_manager_keeps_capacity_under_contention() {
    let mut session = start(&AppConfig::default(), "21");
    let unit_id: UnitId = "M-12".parse().unwrap();

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(session.manager());
            let unit_id = unit_id.clone();
            thread::spawn(move || {
                let name = format!("Guest {i}");
                manager.check_in(&unit_id, &name, date("2025-01-09"), UnitType::Double)
            })
        })
        .collect();

    let results: Vec<Result<_, OccupancyError>> =
        workers.into_iter().map(|w| w.join().unwrap()).collect();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(OccupancyError::Capacity { max_occupants: 2, .. })))
        .count();

    assert_eq!(rejected, 6);
    assert_eq!(session.manager().unit(&unit_id).unwrap().occupants().len(), 2);
    assert_eq!(session.refresh_activity().len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: interleaved check-ins and check-outs keep every unit within
    /// its cohort limit and history only ever grows.
    #[test]
    fn random_operations_respect_invariants(
        ops in prop::collection::vec((0usize..3, any::<bool>(), 0usize..4), 1..40)
    ) {
        let session = start(&AppConfig::default(), "prop");
        let unit_ids: Vec<UnitId> = ["F-F-1", "F-B-13", "A-8"]
            .iter()
            .map(|id| id.parse().unwrap())
            .collect();
        let plans = [UnitType::Single, UnitType::Double, UnitType::Triple, UnitType::Quad];
        let mut history_len = vec![0usize; unit_ids.len()];

        for (which, is_check_in, plan) in ops {
            let unit_id = &unit_ids[which];
            let manager = session.manager();
            if is_check_in {
                let _ = manager.check_in(unit_id, "Guest", date("2025-01-01"), plans[plan]);
            } else if let Some(first) = manager.unit(unit_id).unwrap().occupants().first() {
                manager.check_out(unit_id, first.id).unwrap();
            }

            let unit = session.manager().unit(unit_id).unwrap();
            if let Some(cap) = unit.effective_capacity() {
                prop_assert!(unit.occupants().len() <= cap);
            }
            prop_assert!(unit.history().len() >= history_len[which]);
            history_len[which] = unit.history().len();
        }
    }
}
