//! Application-wide error types.
//!
//! [`ConfigError`] is the narrow contract of snapshot construction: it names
//! exactly which required option was missing or invalid. [`AppError`] covers
//! everything around it (option loading, logging, serialization).

use thiserror::Error;

/// Rejection reasons for building a [`crate::snapshot::SubprocessConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("invalid field {0}: {1}")]
    InvalidField(&'static str, &'static str),
}

impl ConfigError {
    /// Name of the offending option, as spelled in the serialized snapshot.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(name) | Self::InvalidField(name, _) => name,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
