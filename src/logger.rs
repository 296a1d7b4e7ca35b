//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the URL and QR output.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when `-v` is not given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter used with `-v`.
pub const VERBOSE_LEVEL: &str = "debug";

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set and valid.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to set subscriber: {}", e))?;

    Ok(())
}
