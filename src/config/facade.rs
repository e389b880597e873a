//! Config loading entry point: merges defaults, file and environment.

use super::merge::merge_policy;
use super::sources::{config_file, environment};
use super::SemframeConfig;
use crate::error::FrameError;
use std::path::Path;

/// Loads [`SemframeConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: defaults, then `config_file` (if given and
    /// present), then environment overrides. The result is validated.
    pub fn load(config_file: Option<&Path>) -> Result<SemframeConfig, FrameError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = config_file {
            builder = config_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder);

        let config: SemframeConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            FrameError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }

    /// Load configuration from a single file, without environment overrides.
    pub fn load_from_file(path: &Path) -> Result<SemframeConfig, FrameError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = config_file::add_to_builder(builder, path)?;
        Ok(builder.build()?.try_deserialize()?)
    }
}
