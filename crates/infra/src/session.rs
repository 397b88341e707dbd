//! Per-login session wiring.
//!
//! A session owns everything the dashboard needs for one logged-in staff
//! member: the occupancy manager (roster + bus + clock), the site scope they
//! may see, and their activity feed. Nothing outlives [`Session::end`].

use std::sync::Arc;

use lodgeops_events::{EventBus, InMemoryEventBus, Projection, Subscription};
use lodgeops_occupancy::demo::seed_demo_stays;
use lodgeops_occupancy::{
    Clock, OccupancyEnvelope, OccupancyError, OccupancyManager, OccupancyStats, SiteScope,
    SystemClock, Unit,
};

use crate::activity::{ActivityEntry, ActivityFeed};
use crate::config::AppConfig;

pub type SessionBus = Arc<InMemoryEventBus<OccupancyEnvelope>>;
pub type SessionManager = OccupancyManager<SessionBus>;

#[derive(Debug)]
pub struct Session {
    actor: String,
    scope: SiteScope,
    manager: Arc<SessionManager>,
    subscription: Subscription<OccupancyEnvelope>,
    feed: ActivityFeed,
}

impl Session {
    /// Start a session on the wall clock.
    pub fn start(config: &AppConfig, actor: &str) -> Result<Self, OccupancyError> {
        Self::start_with_clock(config, actor, Arc::new(SystemClock))
    }

    pub fn start_with_clock(
        config: &AppConfig,
        actor: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, OccupancyError> {
        let bus: SessionBus = Arc::new(InMemoryEventBus::new());
        // Subscribe first so seeding shows up in the feed.
        let subscription = bus.subscribe();
        let manager = OccupancyManager::with_roster(bus, clock).with_actor(actor);

        if config.seed_demo {
            seed_demo_stays(&manager)?;
        }

        let scope = config.site_scope();
        tracing::info!(actor, scope = ?scope, units = manager.len(), "session started");

        let mut session = Self {
            actor: actor.to_string(),
            scope,
            manager: Arc::new(manager),
            subscription,
            feed: ActivityFeed::new(),
        };
        session.refresh_activity();
        Ok(session)
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn scope(&self) -> &SiteScope {
        &self.scope
    }

    /// Shared handle for call sites (and worker threads) that mutate units.
    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Units this session's staff member is allowed to see.
    pub fn visible_units(&self) -> Vec<Unit> {
        self.manager.units_in_scope(&self.scope)
    }

    pub fn stats(&self) -> OccupancyStats {
        self.manager.occupancy_stats(&self.scope)
    }

    /// Fold any newly published envelopes into the feed.
    pub fn refresh_activity(&mut self) -> &[ActivityEntry] {
        let pending = self.subscription.drain();
        self.feed.apply_all(&pending);
        self.feed.entries()
    }

    pub fn activity(&self) -> &[ActivityEntry] {
        self.feed.entries()
    }

    /// Log out: drop the roster, bus and feed.
    pub fn end(self) {
        tracing::info!(actor = %self.actor, activity = self.feed.len(), "session ended");
    }
}
