//! The fixed unit roster and site scoping.

use serde::{Deserialize, Serialize};

use lodgeops_core::UnitId;

use crate::unit::Unit;

pub const SITE_FNIDAQ: &str = "Fnidaq";
pub const SITE_MDIK: &str = "M'dik";
pub const SITE_AL_HOCEIMA: &str = "Al Hoceima";

/// Every site that has units, in roster order.
pub const SITES: [&str; 3] = [SITE_FNIDAQ, SITE_MDIK, SITE_AL_HOCEIMA];

struct BuildingPlan {
    site: &'static str,
    building: &'static str,
    id_prefix: &'static str,
    label_prefix: &'static str,
    units: u32,
    /// Units numbered above this get the small (2-bed) layout.
    large_up_to: u32,
}

const LARGE_UNIT_BEDS: usize = 4;
const SMALL_UNIT_BEDS: usize = 2;

static BUILDINGS: [BuildingPlan; 4] = [
    BuildingPlan {
        site: SITE_FNIDAQ,
        building: "Imm. Fnidaq",
        id_prefix: "F-F-",
        label_prefix: "N°",
        units: 31,
        large_up_to: 31,
    },
    BuildingPlan {
        site: SITE_FNIDAQ,
        building: "Imm. Bouzaghlal",
        id_prefix: "F-B-",
        label_prefix: "B-",
        units: 16,
        large_up_to: 12,
    },
    BuildingPlan {
        site: SITE_MDIK,
        building: "Résidence M'dik",
        id_prefix: "M-",
        label_prefix: "M-",
        units: 12,
        large_up_to: 11,
    },
    BuildingPlan {
        site: SITE_AL_HOCEIMA,
        building: "Résidence Al Hoceima",
        id_prefix: "A-",
        label_prefix: "AH-",
        units: 8,
        large_up_to: 8,
    },
];

/// Build the full, empty roster: buildings in table order, units by number.
pub fn generate_units() -> Vec<Unit> {
    BUILDINGS
        .iter()
        .flat_map(|plan| {
            (1..=plan.units).map(move |n| {
                let beds = if n <= plan.large_up_to {
                    LARGE_UNIT_BEDS
                } else {
                    SMALL_UNIT_BEDS
                };
                Unit::new(
                    UnitId::numbered(plan.id_prefix, n),
                    format!("{}{n}", plan.label_prefix),
                    plan.building,
                    plan.site,
                    beds,
                )
            })
        })
        .collect()
}

/// Which units a session may see.
///
/// The owner works on the global view; site staff only see their own site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "scope", content = "site")]
pub enum SiteScope {
    #[default]
    All,
    Site(String),
}

impl SiteScope {
    pub fn site(name: impl Into<String>) -> Self {
        SiteScope::Site(name.into())
    }

    pub fn includes(&self, unit: &Unit) -> bool {
        match self {
            SiteScope::All => true,
            SiteScope::Site(site) => unit.site() == site,
        }
    }
}

impl From<Option<String>> for SiteScope {
    fn from(value: Option<String>) -> Self {
        value.map_or(SiteScope::All, SiteScope::Site)
    }
}
