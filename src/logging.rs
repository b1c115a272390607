//! Log setup for the terminal front end.
//!
//! Logs go to stderr so they never interleave with the REPL output on stdout.

use tracing_subscriber::{Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber that prints events at `level` and above.
pub fn setup_logging(level: LevelFilter) {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();
}
