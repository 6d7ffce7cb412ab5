//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve data directory, log level and storage backend from explicit
//!   overrides, then environment variables, then defaults.
//! - Derive the storage, log and export paths under the data directory.
//!
//! # Invariants
//! - `data_dir` is always absolute.
//! - Resolution never touches the filesystem.

use crate::logging::{default_log_level, normalize_level};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_DATA_DIR: &str = "CLEANDAR_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "CLEANDAR_LOG_LEVEL";
pub const ENV_STORAGE: &str = "CLEANDAR_STORAGE";

const DEFAULT_DATA_DIR_NAME: &str = ".cleandar";

/// Where the journal snapshot is mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

impl StorageBackend {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Sqlite => "cleandar.sqlite3",
            Self::Json => "cleandar.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unsupported storage backend `{other}`; expected sqlite|json"
            )),
        }
    }
}

/// Caller-supplied values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<String>,
    pub log_level: Option<String>,
    pub storage: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: &'static str,
    pub storage: StorageBackend,
}

impl AppConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, String> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves against an arbitrary variable lookup.
    ///
    /// Without an explicit or `CLEANDAR_DATA_DIR` data dir, falls back to
    /// `$HOME/.cleandar` (or `%USERPROFILE%\.cleandar`).
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let pick = |explicit: &Option<String>, name: &str| {
            explicit
                .clone()
                .or_else(|| env(name))
                .filter(|value| !value.trim().is_empty())
        };

        let data_dir = match pick(&overrides.data_dir, ENV_DATA_DIR) {
            Some(value) => normalize_data_dir(&value)?,
            None => env("HOME")
                .or_else(|| env("USERPROFILE"))
                .filter(|home| !home.trim().is_empty())
                .map(|home| PathBuf::from(home).join(DEFAULT_DATA_DIR_NAME))
                .ok_or_else(|| {
                    format!("no data directory configured; set {ENV_DATA_DIR} or pass one explicitly")
                })
                .and_then(|path| normalize_data_dir(&path.to_string_lossy()))?,
        };

        let log_level = match pick(&overrides.log_level, ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value)?,
            None => default_log_level(),
        };

        let storage = match pick(&overrides.storage, ENV_STORAGE) {
            Some(value) => value.parse()?,
            None => StorageBackend::default(),
        };

        Ok(Self {
            data_dir,
            log_level,
            storage,
        })
    }

    /// Snapshot file for the configured backend.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(self.storage.file_name())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}

fn normalize_data_dir(value: &str) -> Result<PathBuf, String> {
    let trimmed = value.trim();
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!(
            "data directory must be an absolute path, got `{trimmed}`"
        ));
    }
    Ok(path.to_path_buf())
}
