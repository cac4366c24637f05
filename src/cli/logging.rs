//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::domain::config::DEFAULT_LOG_LEVEL;

/// Install the global subscriber. Logs go to stderr so panel output on
/// stdout stays clean. An invalid filter falls back to the default level.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
