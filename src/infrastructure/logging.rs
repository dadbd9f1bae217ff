//! Logging system initialization
//!
//! Console logging through tracing-subscriber with env-filter based level
//! control. `RUST_LOG` overrides the default level; repeated calls are
//! tolerated so tests can initialize freely.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the default "info" level.
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Initialize the logging system with an explicit default level.
///
/// `RUST_LOG` still takes precedence when set. Returns silently if a global
/// subscriber is already installed.
pub fn init_logging_with_level(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
