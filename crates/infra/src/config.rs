//! Configuration loading from the environment.

use thiserror::Error;

use lodgeops_observability::{LogConfig, LogFormat};
use lodgeops_occupancy::{SITES, SiteScope};

pub const ENV_LOG_FORMAT: &str = "LODGEOPS_LOG_FORMAT";
pub const ENV_LOG_FILTER: &str = "LODGEOPS_LOG_FILTER";
pub const ENV_SEED_DEMO: &str = "LODGEOPS_SEED_DEMO";
pub const ENV_SITE: &str = "LODGEOPS_SITE";

/// Label the dashboard uses for the all-sites view.
const GLOBAL_VIEW: &str = "Vue Globale";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub log: LogConfig,
    /// Seed the demo stays into a fresh roster.
    pub seed_demo: bool,
    /// `None` for the global view.
    pub site: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log.format = raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::invalid(ENV_LOG_FORMAT, reason))?;
        }
        if let Some(raw) = lookup(ENV_LOG_FILTER).filter(|v| !v.trim().is_empty()) {
            config.log.filter = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_SEED_DEMO) {
            config.seed_demo = parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid(ENV_SEED_DEMO, format!("{raw:?} is not a boolean"))
            })?;
        }
        if let Some(raw) = lookup(ENV_SITE) {
            config.site = parse_site(&raw)?;
        }

        Ok(config)
    }

    pub fn site_scope(&self) -> SiteScope {
        SiteScope::from(self.site.clone())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_site(raw: &str) -> Result<Option<String>, ConfigError> {
    let site = raw.trim();
    if site.is_empty() || site == GLOBAL_VIEW || site.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    SITES
        .iter()
        .find(|known| **known == site)
        .map(|known| Some((*known).to_string()))
        .ok_or_else(|| {
            ConfigError::invalid(
                ENV_SITE,
                format!("unknown site {site:?} (expected one of {})", SITES.join(", ")),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.filter, "info");
        assert!(!config.seed_demo);
        assert_eq!(config.site_scope(), SiteScope::All);
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_LOG_FILTER, "lodgeops_occupancy=debug"),
            (ENV_SEED_DEMO, "yes"),
            (ENV_SITE, "M'dik"),
        ]))
        .unwrap();

        assert_eq!(config.log.format, LogFormat::Pretty);
        assert_eq!(config.log.filter, "lodgeops_occupancy=debug");
        assert!(config.seed_demo);
        assert_eq!(config.site_scope(), SiteScope::site("M'dik"));
    }

    #[test]
    fn global_view_label_means_all_sites() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_SITE, "Vue Globale")])).unwrap();
        assert_eq!(config.site, None);
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_SEED_DEMO, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_SEED_DEMO, .. }));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_SITE, "Tanger")])).unwrap_err();
        assert!(err.to_string().contains("unknown site \"Tanger\""));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_LOG_FORMAT, .. }));
    }
}
