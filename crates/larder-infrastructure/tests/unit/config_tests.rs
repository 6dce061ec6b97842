//! Configuration loading tests

use larder_infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig};
use larder_infrastructure::constants::{DEFAULT_DATA_DIR, DEFAULT_RELOAD_DELAY_MS};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.registry.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    assert_eq!(
        config.registry.reload_delay(),
        Duration::from_millis(DEFAULT_RELOAD_DELAY_MS)
    );
    assert!(!config.registry.watch);
    assert!(config.registry.sources_dir.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("larder.toml");
    std::fs::write(
        &path,
        r#"
[registry]
sources_dir = "/etc/larder/sources"
data_dir = "/var/lib/larder"
watch = true
reload_delay_ms = 250

[logging]
level = "debug"
json_format = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(
        config.registry.sources_dir,
        Some(PathBuf::from("/etc/larder/sources"))
    );
    assert_eq!(config.registry.data_dir, PathBuf::from("/var/lib/larder"));
    assert!(config.registry.watch);
    assert_eq!(config.registry.reload_delay_ms, 250);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(temp_dir.path().join("absent.toml"));
    let config = loader.load().unwrap();
    assert_eq!(config.registry.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
}

#[test]
fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.toml");
    let config = ConfigBuilder::new()
        .with_data_dir("/srv/data")
        .with_sources_dir("/srv/sources")
        .with_watch(true)
        .build()
        .unwrap();

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = loader.load().unwrap();

    assert_eq!(reloaded.registry.data_dir, PathBuf::from("/srv/data"));
    assert_eq!(reloaded.registry.sources_dir, Some(PathBuf::from("/srv/sources")));
    assert!(reloaded.registry.watch);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}

#[test]
fn test_reload_delay_ceiling() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("slow.toml");
    std::fs::write(&path, "[registry]\nreload_delay_ms = 3600000\n").unwrap();

    let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
    assert!(err.to_string().contains("Reload delay"));
}

#[test]
fn test_watch_requires_sources_dir() {
    let err = ConfigBuilder::new().with_watch(true).build().unwrap_err();
    assert!(err.to_string().contains("sources directory"));
}

#[test]
fn test_watch_flag_checked_after_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("larder.toml");
    std::fs::write(&path, "[registry]\nwatch = true\n").unwrap();

    let mut config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert!(config.registry.watch);
    assert!(config.validate().is_err());

    config.registry.sources_dir = Some(temp_dir.path().to_path_buf());
    config.validate().unwrap();
}

#[test]
fn test_empty_data_dir_rejected() {
    let err = ConfigBuilder::new().with_data_dir("").build().unwrap_err();
    assert!(err.to_string().contains("Data directory"));
}

#[test]
fn test_invalid_log_level_rejected() {
    let logging = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    let err = ConfigBuilder::new().with_logging(logging).build().unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}
