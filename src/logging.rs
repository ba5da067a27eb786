//! Logging initialization for kopt-tsp.
//!
//! Logging is controlled by the `DEBUG_KOPT_TSP` environment variable and is
//! only compiled in when the `setup_tracing` feature is enabled. If
//! `DEBUG_KOPT_TSP` is not set or is set to a falsy value ("0", "false", or
//! empty), logging stays disabled. Otherwise a debug-level subscriber is
//! installed once, before `main` runs.

use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    if std::env::var("DEBUG_KOPT_TSP").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        // logging stays disabled; tracing macros become no-ops
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
