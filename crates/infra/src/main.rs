use anyhow::Context;
use serde::Serialize;

use lodgeops_infra::{AppConfig, Session};
use lodgeops_occupancy::{OccupancyStats, Unit};

#[derive(Serialize)]
struct Report {
    scope: lodgeops_occupancy::SiteScope,
    stats: OccupancyStats,
    rate_percent: usize,
    occupied: Vec<Unit>,
}

/// Print an occupancy snapshot for the configured site scope as JSON.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    lodgeops_observability::init_with(&config.log);

    let session = Session::start(&config, "report").context("starting session")?;
    let stats = session.stats();
    let report = Report {
        scope: session.scope().clone(),
        stats,
        rate_percent: stats.rate_percent(),
        occupied: session
            .visible_units()
            .into_iter()
            .filter(Unit::is_occupied)
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    session.end();
    Ok(())
}
