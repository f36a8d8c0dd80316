//! Validated subprocess worker configuration.
//!
//! A [`SubprocessConfig`] is built once from a [`PipelineOptions`] source and
//! never changes afterwards. It owns only strings and scalars, so it can be
//! cloned into worker threads or serialized to JSON and handed to a worker
//! process. Deserialization goes through the same validation as
//! [`SubprocessConfig::from_options`].

use std::num::NonZeroU32;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, ConfigError};
use crate::options::{PipelineOptions, SubprocessOptions};

pub const SOURCE_PATH: &str = "sourcePath";
pub const CONCURRENCY: &str = "concurrency";

/// Immutable configuration for a pool of subprocess workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSnapshot")]
pub struct SubprocessConfig {
    source_path: String,
    worker_path: Option<String>,
    wait_time: Option<i32>,
    concurrency: NonZeroU32,
    only_upload_logs_on_error: Option<bool>,
}

impl SubprocessConfig {
    /// Validate `options` and copy them into a snapshot.
    ///
    /// Checks run in order and the first failure is returned:
    /// 1. `sourcePath` must be present and non-empty.
    /// 2. `concurrency` must be present and positive.
    ///
    /// Optional fields are copied as-is; absent stays `None`.
    pub fn from_options<O>(options: &O) -> Result<Self, ConfigError>
    where
        O: PipelineOptions + ?Sized,
    {
        match Self::validate(options) {
            Ok(config) => {
                debug!(
                    source_path = %config.source_path,
                    concurrency = config.concurrency.get(),
                    "subprocess config built"
                );
                Ok(config)
            }
            Err(e) => {
                warn!(field = e.field(), error = %e, "subprocess options rejected");
                Err(e)
            }
        }
    }

    fn validate<O>(options: &O) -> Result<Self, ConfigError>
    where
        O: PipelineOptions + ?Sized,
    {
        let source_path = options
            .source_path()
            .ok_or(ConfigError::MissingRequiredField(SOURCE_PATH))?;
        if source_path.is_empty() {
            return Err(ConfigError::InvalidField(SOURCE_PATH, "must not be empty"));
        }

        // Negative values are rejected alongside zero and absent.
        let concurrency = options
            .concurrency()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::InvalidField(CONCURRENCY, "must be set and > 0"))?;

        Ok(Self {
            source_path: source_path.to_owned(),
            worker_path: options.worker_path().map(str::to_owned),
            wait_time: options.wait_time(),
            concurrency,
            only_upload_logs_on_error: options.only_upload_logs_on_error(),
        })
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn worker_path(&self) -> Option<&str> {
        self.worker_path.as_deref()
    }

    /// Maximum seconds to wait for a subprocess, exactly as supplied.
    pub fn wait_time(&self) -> Option<i32> {
        self.wait_time
    }

    pub fn concurrency(&self) -> u32 {
        self.concurrency.get()
    }

    pub fn only_upload_logs_on_error(&self) -> Option<bool> {
        self.only_upload_logs_on_error
    }

    /// `wait_time` as a timeout. Negative values yield `None`.
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_time
            .and_then(|secs| u64::try_from(secs).ok())
            .map(Duration::from_secs)
    }

    pub fn worker_pool_size(&self) -> usize {
        self.concurrency.get() as usize
    }

    /// Failed runs always upload logs. Successful runs upload unless
    /// `only_upload_logs_on_error` is explicitly `true`.
    pub fn should_upload_logs(&self, run_failed: bool) -> bool {
        run_failed || self.only_upload_logs_on_error != Some(true)
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<&SubprocessOptions> for SubprocessConfig {
    type Error = ConfigError;

    fn try_from(options: &SubprocessOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

impl TryFrom<SubprocessOptions> for SubprocessConfig {
    type Error = ConfigError;

    fn try_from(options: SubprocessOptions) -> Result<Self, Self::Error> {
        Self::from_options(&options)
    }
}

/// Wire shape of a serialized snapshot, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    source_path: Option<String>,
    worker_path: Option<String>,
    wait_time: Option<i32>,
    concurrency: Option<i32>,
    only_upload_logs_on_error: Option<bool>,
}

impl PipelineOptions for RawSnapshot {
    fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    fn worker_path(&self) -> Option<&str> {
        self.worker_path.as_deref()
    }

    fn wait_time(&self) -> Option<i32> {
        self.wait_time
    }

    fn concurrency(&self) -> Option<i32> {
        self.concurrency
    }

    fn only_upload_logs_on_error(&self) -> Option<bool> {
        self.only_upload_logs_on_error
    }
}

impl TryFrom<RawSnapshot> for SubprocessConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Self::from_options(&raw)
    }
}
