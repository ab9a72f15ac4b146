//! Logging Infrastructure
//!
//! Structured logging bootstrap via `tracing-subscriber`. Filtering is
//! env-driven (`RUST_LOG`), defaulting to info for the registry crates.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Safe to call more than once (subsequent calls are no-ops), which keeps
/// test setups simple.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "minutier_server=info,sqlx=warn".into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
