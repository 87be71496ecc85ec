//! Config loader: builds a layered `config::Config` and deserializes it.

use std::path::Path;

use config::File;
use tracing::debug;

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::ScopedConfig;
use crate::error::ContextError;

/// Loads [`ScopedConfig`] from defaults, files and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{SCOPED_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<ScopedConfig, ContextError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: ScopedConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from an explicit file, still honoring environment overrides.
    pub fn load_from_file(path: &Path) -> Result<ScopedConfig, ContextError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: ScopedConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
