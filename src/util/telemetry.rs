//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Default filter applied when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "prometheus_topic_activation=info";

/// Install an env-filtered fmt subscriber unless the host already set one.
///
/// Falls back to [`DEFAULT_LOG_FILTER`] so admissions and rejections are visible
/// without extra configuration.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
