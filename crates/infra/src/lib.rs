//! Infrastructure layer: configuration, session wiring, read models.

pub mod activity;
pub mod config;
pub mod session;

pub use activity::{ActivityEntry, ActivityFeed, Severity};
pub use config::{AppConfig, ConfigError};
pub use session::{Session, SessionBus, SessionManager};
