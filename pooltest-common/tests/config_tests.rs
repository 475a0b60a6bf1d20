//! Tests for configuration file loading and priority resolution
//!
//! Priority order: overrides (CLI/env) > TOML config file > compiled defaults

use pooltest_common::config::{
    default_storage_path, load_toml_config, resolve, validate_storage, BackendKind,
    ConfigOverrides, StorageLocation, TomlConfig, DEFAULT_BIND,
};
use pooltest_common::Error;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_no_overrides_uses_compiled_defaults() {
    let settings = resolve(&ConfigOverrides::default(), None).unwrap();

    assert_eq!(settings.bind.to_string(), DEFAULT_BIND);
    assert_eq!(settings.storage.backend, BackendKind::Sqlite);
    assert_eq!(settings.storage.path, default_storage_path(BackendKind::Sqlite));
}

#[test]
fn test_toml_config_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
bind = "127.0.0.1:9000"

[storage]
backend = "append-log"
path = "/var/tmp/pooltest/payloads.log"
"#,
    );

    let config = load_toml_config(&path).unwrap();
    let settings = resolve(&ConfigOverrides::default(), Some(&config)).unwrap();

    assert_eq!(settings.bind.to_string(), "127.0.0.1:9000");
    assert_eq!(settings.storage.backend, BackendKind::AppendLog);
    assert_eq!(
        settings.storage.path,
        PathBuf::from("/var/tmp/pooltest/payloads.log")
    );
}

#[test]
fn test_overrides_beat_toml() {
    let config = TomlConfig {
        bind: Some("127.0.0.1:9000".to_string()),
        storage: toml::from_str("backend = \"append-log\"\npath = \"/from/file.log\"").unwrap(),
    };
    let overrides = ConfigOverrides {
        bind: Some("127.0.0.1:7000".to_string()),
        backend: Some(BackendKind::Sqlite),
        db_path: Some(PathBuf::from("/from/cli/readings.db")),
        log_path: Some(PathBuf::from("/from/cli/payloads.log")),
    };

    let settings = resolve(&overrides, Some(&config)).unwrap();
    assert_eq!(settings.bind.to_string(), "127.0.0.1:7000");
    assert_eq!(settings.storage.backend, BackendKind::Sqlite);
    assert_eq!(settings.storage.path, PathBuf::from("/from/cli/readings.db"));
}

#[test]
fn test_path_override_follows_selected_backend() {
    let overrides = ConfigOverrides {
        backend: Some(BackendKind::AppendLog),
        db_path: Some(PathBuf::from("/ignored/readings.db")),
        log_path: Some(PathBuf::from("/data/payloads.log")),
        ..ConfigOverrides::default()
    };

    let settings = resolve(&overrides, None).unwrap();
    assert_eq!(settings.storage.path, PathBuf::from("/data/payloads.log"));
}

#[test]
fn test_toml_path_used_when_no_cli_path() {
    let config: TomlConfig = toml::from_str("[storage]\npath = \"/srv/readings.db\"").unwrap();

    let settings = resolve(&ConfigOverrides::default(), Some(&config)).unwrap();
    assert_eq!(settings.storage.backend, BackendKind::Sqlite);
    assert_eq!(settings.storage.path, PathBuf::from("/srv/readings.db"));
}

#[test]
fn test_empty_toml_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config = load_toml_config(&path).unwrap();
    assert!(config.bind.is_none());
    assert!(config.storage.backend.is_none());
}

#[test]
fn test_missing_explicit_config_file_is_error() {
    let dir = TempDir::new().unwrap();
    let result = load_toml_config(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_toml_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[storage\nbackend = ");
    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_unknown_backend_in_toml_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[storage]\nbackend = \"postgres\"\n");
    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_relative_path_rejected() {
    let overrides = ConfigOverrides {
        db_path: Some(PathBuf::from("readings.db")),
        ..ConfigOverrides::default()
    };

    let err = resolve(&overrides, None).unwrap_err();
    assert!(err.to_string().contains("absolute"), "unexpected error: {}", err);
}

#[test]
fn test_directory_path_rejected() {
    let dir = TempDir::new().unwrap();
    let location = StorageLocation {
        backend: BackendKind::Sqlite,
        path: dir.path().to_path_buf(),
    };
    assert!(matches!(validate_storage(&location), Err(Error::Config(_))));
}

#[test]
fn test_invalid_bind_rejected() {
    let overrides = ConfigOverrides {
        bind: Some("not-an-address".to_string()),
        ..ConfigOverrides::default()
    };
    assert!(matches!(resolve(&overrides, None), Err(Error::Config(_))));
}

#[test]
fn test_memory_backend_needs_no_path() {
    let overrides = ConfigOverrides {
        backend: Some(BackendKind::Memory),
        db_path: Some(PathBuf::from("relative-but-unused.db")),
        ..ConfigOverrides::default()
    };

    let settings = resolve(&overrides, None).unwrap();
    assert_eq!(settings.storage.backend, BackendKind::Memory);
    assert!(settings.storage.path.as_os_str().is_empty());
}
