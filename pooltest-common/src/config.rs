//! Configuration loading and storage location resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (handled by the binary)
//! 2. TOML config file
//! 3. Compiled defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default listen address
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Which storage backend persists measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Single-table SQLite database (supports listing)
    #[default]
    Sqlite,
    /// Newline-delimited JSON file (write-only)
    AppendLog,
    /// Process memory, lost on exit
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::AppendLog => "append-log",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "append-log" | "append_log" => Ok(BackendKind::AppendLog),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!(
                "unknown backend '{}' (expected sqlite, append-log or memory)",
                other
            )),
        }
    }
}

/// Resolved storage target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub backend: BackendKind,
    /// Database or log file; empty for the memory backend
    pub path: PathBuf,
}

/// `[storage]` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    pub backend: Option<BackendKind>,
    pub path: Option<PathBuf>,
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub bind: Option<String>,
    #[serde(default)]
    pub storage: StorageSection,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub backend: Option<BackendKind>,
    /// SQLite database file (`READINGS_DB`)
    pub db_path: Option<PathBuf>,
    /// Append log file
    pub log_path: Option<PathBuf>,
}

/// Fully resolved and validated service settings
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub bind: SocketAddr,
    pub storage: StorageLocation,
}

/// Load and parse a TOML config file
///
/// Unlike the default location, an explicitly named file must exist.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// `<config_dir>/pooltest/config.toml`, if present
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("pooltest").join("config.toml"))
        .filter(|p| p.exists())
}

/// OS-dependent data directory for storage files
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("pooltest"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/pooltest"))
}

/// Compiled default storage file for a backend
pub fn default_storage_path(backend: BackendKind) -> PathBuf {
    match backend {
        BackendKind::Sqlite => default_data_dir().join("readings.db"),
        BackendKind::AppendLog => default_data_dir().join("webhook_payloads.log"),
        BackendKind::Memory => PathBuf::new(),
    }
}

/// Merge overrides, config file and defaults, then validate
pub fn resolve(overrides: &ConfigOverrides, file: Option<&TomlConfig>) -> Result<ServiceSettings> {
    let bind_str = overrides
        .bind
        .clone()
        .or_else(|| file.and_then(|f| f.bind.clone()))
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    let bind = bind_str
        .parse::<SocketAddr>()
        .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_str, e)))?;

    let backend = overrides
        .backend
        .or_else(|| file.and_then(|f| f.storage.backend))
        .unwrap_or_default();

    let cli_path = match backend {
        BackendKind::Sqlite => overrides.db_path.clone(),
        BackendKind::AppendLog => overrides.log_path.clone(),
        BackendKind::Memory => None,
    };

    let path = match backend {
        BackendKind::Memory => PathBuf::new(),
        _ => cli_path
            .or_else(|| file.and_then(|f| f.storage.path.clone()))
            .unwrap_or_else(|| default_storage_path(backend)),
    };

    let storage = StorageLocation { backend, path };
    validate_storage(&storage)?;

    Ok(ServiceSettings { bind, storage })
}

/// Reject storage paths that cannot be used
pub fn validate_storage(location: &StorageLocation) -> Result<()> {
    if location.backend == BackendKind::Memory {
        return Ok(());
    }

    let path = &location.path;
    if path.as_os_str().is_empty() {
        return Err(Error::Config(format!(
            "No storage path configured for the {} backend",
            location.backend
        )));
    }
    if !path.is_absolute() {
        return Err(Error::Config(format!(
            "Storage path must be absolute: {}",
            path.display()
        )));
    }
    if path.is_dir() {
        return Err(Error::Config(format!(
            "Storage path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parses_aliases() {
        assert_eq!("sqlite".parse::<BackendKind>(), Ok(BackendKind::Sqlite));
        assert_eq!("Append-Log".parse::<BackendKind>(), Ok(BackendKind::AppendLog));
        assert_eq!("append_log".parse::<BackendKind>(), Ok(BackendKind::AppendLog));
        assert_eq!("memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert!("postgres".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_display_round_trips() {
        for kind in [BackendKind::Sqlite, BackendKind::AppendLog, BackendKind::Memory] {
            assert_eq!(kind.to_string().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_default_storage_paths_are_distinct() {
        let db = default_storage_path(BackendKind::Sqlite);
        let log = default_storage_path(BackendKind::AppendLog);
        assert_ne!(db, log);
        assert!(db.ends_with("readings.db"));
        assert!(default_storage_path(BackendKind::Memory).as_os_str().is_empty());
    }
}
