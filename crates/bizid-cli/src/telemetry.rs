//! Log output for the `bizid` binary.
//!
//! Logs are written to stderr so that stdout carries only command output and
//! can be piped. Filtering comes from `RUST_LOG` and defaults to `warn`; the
//! library reports clock backtracks and sequence exhaustion at `debug`.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails if a global subscriber was already installed.
pub fn init_tracing() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
