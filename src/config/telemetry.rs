//! Tracing subscriber setup for embedding binaries and tests.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); `LOG_FORMAT=pretty`
/// switches from JSON lines to human-readable output. Calling this twice
/// is a no-op rather than a panic, so tests can call it freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let result = if log_format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.json().try_init()
    };
    // Already-set subscribers are fine; keep whichever came first.
    let _ = result;
}
