//! Logging setup with `tracing-subscriber`

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber
///
/// Level comes from `RUST_LOG` (default `info`), e.g.
/// `RUST_LOG=erection_core=debug`.
///
/// ```no_run
/// erection_core::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Debug-level subscriber for tests; repeated calls are ignored
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
