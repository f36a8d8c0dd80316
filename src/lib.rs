//! Validated configuration snapshots for subprocess-backed pipeline workers.
//!
//! The binary entry point is src/main.rs.

pub mod error;
pub mod logger;
pub mod options;
pub mod snapshot;

pub use error::{AppError, ConfigError};
pub use options::{PipelineOptions, SubprocessOptions};
pub use snapshot::SubprocessConfig;
