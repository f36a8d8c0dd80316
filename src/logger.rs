//! Logging initialisation via tracing-subscriber.
//!
//! Events go to stderr; stdout is reserved for the snapshot JSON.

use std::env;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber. A parseable `RUST_LOG` wins over `level`.
///
/// `level` is any `EnvFilter` directive string: a bare level such as `"info"`
/// or a targeted one such as `"subprocess_kernel=debug"`.
pub fn init(level: &str) -> Result<(), AppError> {
    let filter = build_filter(level, env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// `rust_log` takes precedence when it parses; otherwise `level` is used.
fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
}
