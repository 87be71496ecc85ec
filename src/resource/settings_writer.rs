//! One-shot settings writer.
//!
//! `enter` opens (or creates) the sled store at the configured path, `write`
//! stores key/value pairs while the scope is active, and `exit` flushes the
//! store and releases the handle so the path can be reopened.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ContextError;
use crate::resource::settings_store::SettingsExt;
use crate::scope::ResourceContext;

/// Settings writer bound to a sled store directory
#[derive(Debug)]
pub struct SettingsWriter {
    path: PathBuf,
    db: Option<sled::Db>,
    written: usize,
}

impl SettingsWriter {
    /// Create a writer for the store at `path`. Nothing is opened until `enter`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            db: None,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_active(&self) -> bool {
        self.db.is_some()
    }

    /// Number of pairs written through this writer
    pub fn written(&self) -> usize {
        self.written
    }

    /// Store `value` under `key`. Only valid between `enter` and `exit`.
    pub fn write<V: Serialize + ?Sized>(&mut self, key: &str, value: &V) -> Result<(), ContextError> {
        let db = self.db.as_ref().ok_or(ContextError::NotEntered)?;
        db.write_setting(key, value)?;
        self.written += 1;
        Ok(())
    }
}

impl ResourceContext for SettingsWriter {
    type Error = ContextError;

    fn enter(&mut self) -> Result<(), ContextError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(&self.path)?;
        debug!(path = %self.path.display(), "Opened settings store");
        self.db = Some(db);
        Ok(())
    }

    fn exit(&mut self, failure: Option<&ContextError>) -> Result<(), ContextError> {
        if let Some(err) = failure {
            warn!(
                path = %self.path.display(),
                written = self.written,
                error = %err,
                "Settings scope failed, flushing partial writes"
            );
        }
        // Enter may have failed before a handle existed
        let Some(db) = self.db.take() else {
            return Ok(());
        };
        db.flush()?;
        info!(path = %self.path.display(), written = self.written, "Flushed settings");
        Ok(())
    }
}
