//! Diagnostics via `tracing`, written to stderr.
//!
//! Results are printed by the binaries themselves; logging never carries them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (from
/// `[logging] filter` in `config.toml`) is used.
///
/// # Example
/// ```bash
/// RUST_LOG=patrol_sim=debug cargo run --bin patrol_report -- layout.txt
/// ```
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
