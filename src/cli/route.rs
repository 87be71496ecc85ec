//! CLI route: run context and command dispatch to the scoped demonstrations.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::cli::output::format_settings;
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, ScopedConfig};
use crate::error::ContextError;
use crate::resource::{FileReader, SettingsExt, SettingsWriter};
use crate::scope::ScopeExt;

/// Runtime context for CLI execution: workspace root and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ScopedConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ContextError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ContextError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &ScopedConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a command and return its output
    pub fn execute(&self, command: &Commands) -> Result<String, ContextError> {
        match command {
            Commands::Read { path } => self.handle_read(path),
            Commands::Write {
                store,
                fail_after,
                pairs,
            } => self.handle_write(store.as_deref(), *fail_after, pairs),
            Commands::Show { store } => self.handle_show(store.as_deref()),
        }
    }

    /// Explicit store overrides resolve against the workspace like the configured one
    fn store_path(&self, store: Option<&Path>) -> PathBuf {
        match store {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.workspace_root.join(path),
            None => self.config.settings.resolve_store_path(&self.workspace_root),
        }
    }

    fn handle_read(&self, path: &Path) -> Result<String, ContextError> {
        let reader = FileReader::open(path)?;
        let contents = reader.try_scoped(|r| r.read_to_string())?;
        info!(path = %path.display(), bytes = contents.len(), "Read file");
        Ok(contents)
    }

    fn handle_write(
        &self,
        store: Option<&Path>,
        fail_after: Option<usize>,
        pairs: &[String],
    ) -> Result<String, ContextError> {
        let settings = pairs
            .iter()
            .map(|pair| parse_setting(pair))
            .collect::<Result<Vec<_>, _>>()?;

        let store_path = self.store_path(store);
        let mut writer = SettingsWriter::new(&store_path);
        (&mut writer).try_scoped(|w| {
            for (index, (key, value)) in settings.iter().enumerate() {
                if fail_after == Some(index) {
                    return Err(ContextError::block(format!(
                        "stopped after {} of {} writes",
                        index,
                        settings.len()
                    )));
                }
                w.write(key, value)?;
            }
            Ok(())
        })?;

        Ok(format!(
            "Wrote {} setting(s) to {}",
            writer.written(),
            store_path.display()
        ))
    }

    fn handle_show(&self, store: Option<&Path>) -> Result<String, ContextError> {
        let store_path = self.store_path(store);
        if !store_path.exists() {
            return Ok(format!("No settings store at {}", store_path.display()));
        }

        let db = sled::open(&store_path)?;
        let settings = db.try_scoped(|db| db.settings())?;
        Ok(format_settings(&settings))
    }
}

/// Parse `KEY=VALUE`. VALUE becomes JSON when it parses as JSON, else a string.
pub fn parse_setting(pair: &str) -> Result<(String, Value), ContextError> {
    let (key, raw) = pair.split_once('=').ok_or_else(|| {
        ContextError::InvalidArgument(format!("expected KEY=VALUE, got '{}'", pair))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ContextError::InvalidArgument(format!(
            "empty key in '{}'",
            pair
        )));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
