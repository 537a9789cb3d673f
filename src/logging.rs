// ============================================================================
// LOGGING
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Initialise logging. Defaults to `info`, or `debug` when asked for; in debug
/// mode `RUST_LOG` may override the filter (e.g. `RUST_LOG=etch_a_sketch=trace`
/// to see every stroke).
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
