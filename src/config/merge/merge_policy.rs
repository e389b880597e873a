//! Merge rules: defaults first, later sources override earlier ones.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("manager.namespace", crate::manager::DEFAULT_NAMESPACE)?
        .set_default("manager.inference", "rdfs")?
        .set_default("storage.backend", "memory")?
        .set_default("storage.path", ".semframe/store")
}
