//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape. The `load` module converts them
//! into [`super::SubprocessOptions`].

use serde::Deserialize;

/// Raw TOML shape, the serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawOptions {
    #[serde(default)]
    pub subprocess: RawSubprocess,
    #[serde(default)]
    pub logging: RawLogging,
}

/// `[subprocess]`: every key optional at this layer.
#[derive(Deserialize, Default)]
pub(super) struct RawSubprocess {
    pub source_path: Option<String>,
    pub worker_path: Option<String>,
    pub wait_time: Option<i32>,
    pub concurrency: Option<i32>,
    pub only_upload_logs_on_error: Option<bool>,
}

#[derive(Deserialize)]
pub(super) struct RawLogging {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for RawLogging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}
