//! Process-wide tracing setup.

/// Tracing subscriber configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};

/// Initialize tracing with defaults (JSON, `RUST_LOG` or `info`).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() -> bool {
    tracing::init(&LogConfig::default())
}

/// Initialize tracing from explicit configuration.
pub fn init_with(config: &LogConfig) -> bool {
    tracing::init(config)
}
