//! Configuration System
//!
//! Layered configuration for managers: built-in defaults, an optional TOML
//! file, then `SEMFRAME_*` environment overrides (`__` separates nested
//! keys, e.g. `SEMFRAME_STORAGE__BACKEND=sled`).

use crate::logging::LoggingConfig;
use crate::manager::DEFAULT_NAMESPACE;
use crate::store::InferencePolicy;
use crate::uri::validate_uri;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemframeConfig {
    /// Frame manager settings
    #[serde(default)]
    pub manager: ManagerConfig,

    /// Store back-end settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Frame manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// URI prefix under which frame URIs are generated
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Inference applied by every frame store
    #[serde(default)]
    pub inference: InferencePolicy,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            inference: InferencePolicy::default(),
        }
    }
}

/// Store back-end selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-memory stores
    #[default]
    Memory,
    /// One sled tree per frame in a shared database
    Sled,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database directory (sled back-end only)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".semframe/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Manager(String),
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Manager(msg) => write!(f, "Manager: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SemframeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_uri(&self.manager.namespace, "namespace") {
            errors.push(ValidationError::Manager(e.to_string()));
        }

        if self.storage.backend == StorageBackend::Sled && self.storage.path.as_os_str().is_empty()
        {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty for the sled backend".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
