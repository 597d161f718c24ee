//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so only one
//! test here initializes logging successfully.

use kura::config::LoggingConfig;
use kura::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_invalid_rotation_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        local_enabled: true,
        local_path: temp_dir.path().join("logs").to_string_lossy().to_string(),
        local_rotation: "weekly".to_string(),
    };

    let result = init_logging("info", &config);
    assert!(result.is_err());
    assert!(!temp_dir.path().join("logs").exists());
}

#[test]
fn test_file_logging_creates_directory_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("nested").join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(table = "jlpt_vocab", rows = 10, "Table written");
    drop(guard);

    assert!(log_path.is_dir());
    assert!(log_path.join("kura.log").exists());
}
