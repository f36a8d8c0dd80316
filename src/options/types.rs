//! Public option types.
//!
//! [`SubprocessOptions`] is the loosely-validated side: every field may be
//! absent and `concurrency` may be zero or negative. Requiredness is enforced
//! later, when a [`crate::snapshot::SubprocessConfig`] is built from it.

/// Read access to a named option set.
///
/// Snapshot construction reads through this trait only, so any option
/// container (parsed file, CLI layer, test fixture) can feed it.
pub trait PipelineOptions {
    /// Location of the external library to stage, e.g. `gs://bucket/lib`.
    fn source_path(&self) -> Option<&str>;
    /// Local working directory for staged files and subprocess I/O.
    fn worker_path(&self) -> Option<&str>;
    /// Maximum seconds to wait for a subprocess to complete.
    fn wait_time(&self) -> Option<i32>;
    /// Number of concurrent subprocess workers.
    fn concurrency(&self) -> Option<i32>;
    /// Whether logs are uploaded only when a run fails.
    fn only_upload_logs_on_error(&self) -> Option<bool>;
}

/// Resolved option set, as produced by [`super::load`] / [`super::load_from`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubprocessOptions {
    pub source_path: Option<String>,
    /// Already `~`-expanded when loaded from a file or the environment.
    pub worker_path: Option<String>,
    pub wait_time: Option<i32>,
    pub concurrency: Option<i32>,
    pub only_upload_logs_on_error: Option<bool>,
    /// Log level for the binary; not part of the snapshot.
    pub log_level: String,
}

impl Default for SubprocessOptions {
    fn default() -> Self {
        Self {
            source_path: None,
            worker_path: None,
            wait_time: None,
            concurrency: None,
            only_upload_logs_on_error: None,
            log_level: super::raw::default_log_level(),
        }
    }
}

impl SubprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    pub fn with_worker_path(mut self, worker_path: impl Into<String>) -> Self {
        self.worker_path = Some(worker_path.into());
        self
    }

    pub fn with_wait_time(mut self, seconds: i32) -> Self {
        self.wait_time = Some(seconds);
        self
    }

    pub fn with_concurrency(mut self, concurrency: i32) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn with_only_upload_logs_on_error(mut self, only_on_error: bool) -> Self {
        self.only_upload_logs_on_error = Some(only_on_error);
        self
    }
}

impl PipelineOptions for SubprocessOptions {
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
