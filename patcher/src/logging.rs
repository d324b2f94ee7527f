//! Progress logging for the patcher.
//!
//! - **Tracing (this module)**: step progress and diagnostics via `RUST_LOG`,
//!   output to stderr.
//! - **Report (`report`)**: the run summary or JSON report on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `patcher=info` so step progress is visible.
///
/// # Example
/// ```bash
/// RUST_LOG=patcher=debug patcher apply --dry-run
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("patcher=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
