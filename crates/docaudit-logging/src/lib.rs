//! Tracing setup shared by the docaudit binaries.
//!
//! Reports go to stdout, so every log line is written to stderr.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `--verbose` is passed
const VERBOSE_LEVEL: &str = "debug";

/// Initialize the logging system.
///
/// `RUST_LOG` wins over both `level` and `verbose`.
pub fn init_logging(level: &str, verbose: bool) -> Result<()> {
    let level = if verbose { VERBOSE_LEVEL } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
