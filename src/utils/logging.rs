//! Logging initialization utilities

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with an env-filter directive.
///
/// Reads `RUST_LOG` when set, falling back to the provided default level.
/// Intended for binaries and test harnesses embedding this crate; calling it
/// twice is a no-op.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
