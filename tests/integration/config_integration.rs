//! Integration tests for Configuration System

use super::test_utils::with_env;
use semframe::config::{ConfigLoader, SemframeConfig, StorageBackend};
use semframe::manager::DEFAULT_NAMESPACE;
use semframe::{FrameError, FrameManager, InferencePolicy};
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, config: &SemframeConfig) -> std::path::PathBuf {
    let config_file = temp_dir.path().join("semframe.toml");
    std::fs::write(&config_file, toml::to_string(config).unwrap()).unwrap();
    config_file
}

#[test]
fn test_defaults_without_config_file() {
    let config = with_env(&[], || ConfigLoader::load(None)).unwrap();

    assert_eq!(config.manager.namespace, DEFAULT_NAMESPACE);
    assert_eq!(config.manager.inference, InferencePolicy::Rdfs);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
}

#[test]
fn test_serialized_config_round_trips_through_loader() {
    let temp_dir = TempDir::new().unwrap();
    let mut expected = SemframeConfig::default();
    expected.manager.namespace = "http://example.org/frames".to_string();
    expected.manager.inference = InferencePolicy::None;
    expected.storage.backend = StorageBackend::Sled;
    expected.storage.path = temp_dir.path().join("store");
    expected.logging.level = "debug".to_string();

    let config_file = write_config(&temp_dir, &expected);
    let config = ConfigLoader::load_from_file(&config_file).unwrap();

    assert_eq!(config.manager.namespace, expected.manager.namespace);
    assert_eq!(config.manager.inference, InferencePolicy::None);
    assert_eq!(config.storage.backend, StorageBackend::Sled);
    assert_eq!(config.storage.path, expected.storage.path);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_environment_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut file_config = SemframeConfig::default();
    file_config.manager.namespace = "http://example.org/frames".to_string();
    let config_file = write_config(&temp_dir, &file_config);

    let config = with_env(
        &[
            ("SEMFRAME_STORAGE__BACKEND", "sled"),
            ("SEMFRAME_MANAGER__INFERENCE", "none"),
        ],
        || ConfigLoader::load(Some(&config_file)),
    )
    .unwrap();

    assert_eq!(config.manager.namespace, "http://example.org/frames");
    assert_eq!(config.storage.backend, StorageBackend::Sled);
    assert_eq!(config.manager.inference, InferencePolicy::None);
}

#[test]
fn test_invalid_namespace_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("semframe.toml");
    std::fs::write(
        &config_file,
        r#"
[manager]
namespace = "not a namespace"
"#,
    )
    .unwrap();

    let result = with_env(&[], || ConfigLoader::load(Some(&config_file)));
    assert!(matches!(result, Err(FrameError::ConfigError(_))));
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config =
        with_env(&[], || ConfigLoader::load(Some(&temp_dir.path().join("absent.toml")))).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
}

#[test]
fn test_manager_uses_configured_namespace() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("semframe.toml");
    std::fs::write(
        &config_file,
        r#"
[manager]
namespace = "http://example.org/frames"
inference = "none"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let manager = FrameManager::from_config(&config).unwrap();
    let frame = manager.create_frame(None).unwrap();

    assert!(frame.uri().starts_with("http://example.org/frames#"));
    assert_eq!(manager.namespace(), "http://example.org/frames");
}
