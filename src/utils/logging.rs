//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::adapters::LogFormat;
use crate::error::{FavcError, FavcResult};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Progress goes to stderr so that
/// stdout stays free for piping.
pub fn init_logging(level: &str, format: LogFormat) -> FavcResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| FavcError::Config(format!("Invalid log filter {}: {}", level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| FavcError::Config(format!("Failed to initialize logging: {}", e)))
}
