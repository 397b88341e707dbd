//! Staff activity feed built from occupancy envelopes.
//!
//! A best-effort "who did what" list for the dashboard. It is rebuilt from
//! the event stream on every session and makes no tamper-evidence promises.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgeops_core::{EventId, UnitId};
use lodgeops_events::{Event, EventEnvelope, Projection};
use lodgeops_occupancy::OccupancyEvent;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub event_id: EventId,
    pub actor: String,
    pub action: String,
    pub target: String,
    pub date: DateTime<Utc>,
    pub severity: Severity,
}

/// Newest-first activity list.
///
/// Keeps a per-unit sequence cursor; envelopes at or below it are replays
/// and are skipped.
#[derive(Debug, Default)]
pub struct ActivityFeed {
    entries: Vec<ActivityEntry>,
    cursors: HashMap<UnitId, u64>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries attributed to one staff member.
    pub fn by_actor<'a>(&'a self, actor: &'a str) -> impl Iterator<Item = &'a ActivityEntry> + 'a {
        self.entries.iter().filter(move |e| e.actor == actor)
    }
}

impl Projection for ActivityFeed {
    type Ev = OccupancyEvent;

    fn apply(&mut self, envelope: &EventEnvelope<OccupancyEvent>) {
        let seq = envelope.sequence_number();
        let last = self.cursors.entry(envelope.unit_id().clone()).or_insert(0);
        if seq <= *last {
            return;
        }
        *last = seq;

        let (action, target, severity) = match envelope.payload() {
            OccupancyEvent::OccupantCheckedIn(e) => (
                "Check-in",
                format!("{} ({}) in {}", e.occupant.name, e.occupant.unit_type, e.unit_id),
                Severity::Info,
            ),
            OccupancyEvent::OccupantCheckedOut(e) => (
                "Check-out",
                format!("{} from {}", e.record.client_name, e.unit_id),
                Severity::Warning,
            ),
        };

        self.entries.insert(
            0,
            ActivityEntry {
                event_id: envelope.event_id(),
                actor: envelope.actor().to_string(),
                action: action.to_string(),
                target,
                date: envelope.payload().occurred_at(),
                severity,
            },
        );
    }
}
