//! Option loading with env-var overrides.
//!
//! Reads one TOML file and applies `SUBPROCESS_*` env overrides on top.

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::AppError;

use super::raw::RawOptions;
use super::types::SubprocessOptions;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Raw env-var values, read once. Tests build this directly instead of
/// mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub source_path: Option<String>,
    pub worker_path: Option<String>,
    pub wait_time: Option<String>,
    pub concurrency: Option<String>,
    pub only_upload_logs_on_error: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            source_path: env::var("SUBPROCESS_SOURCE_PATH").ok(),
            worker_path: env::var("SUBPROCESS_WORKER_PATH").ok(),
            wait_time: env::var("SUBPROCESS_WAIT_TIME").ok(),
            concurrency: env::var("SUBPROCESS_CONCURRENCY").ok(),
            only_upload_logs_on_error: env::var("SUBPROCESS_ONLY_UPLOAD_LOGS_ON_ERROR").ok(),
            log_level: env::var("SUBPROCESS_LOG_LEVEL").ok(),
        }
    }

    /// Overlay these values onto `options`. Unparseable numbers or booleans
    /// are reported rather than dropped.
    fn apply(&self, options: &mut SubprocessOptions) -> Result<(), AppError> {
        if let Some(v) = &self.source_path {
            options.source_path = Some(v.clone());
        }
        if let Some(v) = &self.worker_path {
            options.worker_path = Some(expand_worker_path(v));
        }
        if let Some(v) = &self.wait_time {
            options.wait_time = Some(parse_override("SUBPROCESS_WAIT_TIME", v)?);
        }
        if let Some(v) = &self.concurrency {
            options.concurrency = Some(parse_override("SUBPROCESS_CONCURRENCY", v)?);
        }
        if let Some(v) = &self.only_upload_logs_on_error {
            options.only_upload_logs_on_error =
                Some(parse_bool_override("SUBPROCESS_ONLY_UPLOAD_LOGS_ON_ERROR", v)?);
        }
        if let Some(v) = &self.log_level {
            options.log_level = v.clone();
        }
        Ok(())
    }
}

fn parse_override<T>(name: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{name}={value:?}: {e}")))
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{name}={value:?}: expected a boolean"
        ))),
    }
}

/// Load options from the given path, or `config/default.toml`, then apply
/// env-var overrides.
pub fn load(config_path: Option<&str>) -> Result<SubprocessOptions, AppError> {
    resolve(
        config_path.map(Path::new),
        Path::new(DEFAULT_CONFIG_PATH),
        &EnvOverrides::from_env(),
    )
}

/// Pick the options file: an explicit path must exist, the default path is
/// used only if present, and with neither the environment alone contributes.
fn resolve(
    config_path: Option<&Path>,
    default_path: &Path,
    overrides: &EnvOverrides,
) -> Result<SubprocessOptions, AppError> {
    if let Some(path) = config_path {
        return load_from(path, overrides);
    }
    if default_path.exists() {
        return load_from(default_path, overrides);
    }

    debug!(default = %default_path.display(), "no options file; using environment only");
    let mut options = SubprocessOptions::default();
    overrides.apply(&mut options)?;
    Ok(options)
}

/// Loader with explicit overrides.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<SubprocessOptions, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed: RawOptions = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let s = parsed.subprocess;
    let mut options = SubprocessOptions {
        source_path: s.source_path,
        worker_path: s.worker_path.as_deref().map(expand_worker_path),
        wait_time: s.wait_time,
        concurrency: s.concurrency,
        only_upload_logs_on_error: s.only_upload_logs_on_error,
        log_level: parsed.logging.level,
    };
    overrides.apply(&mut options)?;

    debug!(path = %path.display(), "options loaded");
    Ok(options)
}

fn expand_worker_path(path: &str) -> String {
    expand_home(path).to_string_lossy().into_owned()
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const OPTIONS_TOML: &str = "[subprocess]\nsource_path = \"gs://bucket/file\"\nconcurrency = 3\n";

    fn env_with_source(source: &str) -> EnvOverrides {
        EnvOverrides {
            source_path: Some(source.into()),
            ..EnvOverrides::default()
        }
    }

    #[test]
    fn explicit_path_beats_default() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let default = dir.path().join("default.toml");
        std::fs::write(&explicit, OPTIONS_TOML).unwrap();
        std::fs::write(&default, "[subprocess]\nconcurrency = 9\n").unwrap();

        let opts = resolve(Some(&explicit), &default, &EnvOverrides::default()).unwrap();
        assert_eq!(opts.concurrency, Some(3));
    }

    #[test]
    fn missing_explicit_path_errors() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join("default.toml");
        std::fs::write(&default, OPTIONS_TOML).unwrap();

        let missing = dir.path().join("missing.toml");
        let msg = resolve(Some(&missing), &default, &EnvOverrides::default())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("cannot read"));
    }

    #[test]
    fn default_file_used_when_present() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join("default.toml");
        std::fs::write(&default, OPTIONS_TOML).unwrap();

        let opts = resolve(None, &default, &env_with_source("gs://env/lib")).unwrap();
        assert_eq!(opts.concurrency, Some(3));
        assert_eq!(opts.source_path.as_deref(), Some("gs://env/lib"));
    }

    #[test]
    fn environment_only_without_any_file() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join("absent.toml");
        let env = EnvOverrides {
            concurrency: Some("2".into()),
            ..env_with_source("gs://env/lib")
        };

        let opts = resolve(None, &default, &env).unwrap();
        assert_eq!(opts.source_path.as_deref(), Some("gs://env/lib"));
        assert_eq!(opts.concurrency, Some(2));
        assert_eq!(opts.worker_path, None);
        assert_eq!(opts.log_level, "info");
    }

    #[test]
    fn environment_only_still_checks_overrides() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverrides {
            wait_time: Some("soon".into()),
            ..EnvOverrides::default()
        };
        let msg = resolve(None, &dir.path().join("absent.toml"), &env)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("SUBPROCESS_WAIT_TIME"));
    }
}
