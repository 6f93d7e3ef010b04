//! Logging setup for binaries and tests that drive jtdgen.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install a formatting subscriber as the global default.
///
/// `filter` uses `EnvFilter` directive syntax (`"info"`, `"jtdgen_core=debug"`).
/// `RUST_LOG`, when set, takes precedence. Calling this when a global
/// subscriber is already installed does nothing.
pub fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));

    // Ignore the error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Like [`init_logging`], but writes through the test harness's capture.
pub fn init_test_logging(filter: &str) {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_test_writer());

    let _ = tracing::subscriber::set_global_default(subscriber);
}
