//! Settings on a sled store, and the store types as resource contexts.
//!
//! `sled::Db` and `sled::Tree` conform to [`ResourceContext`] directly, so an
//! already-open store can be handed to the runner without a wrapper. Entering
//! is a no-op; exiting flushes to disk.
//!
//! Settings values are stored as JSON bytes keyed by UTF-8 names, which keeps
//! them dynamically typed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ContextError;
use crate::scope::ResourceContext;

/// Typed settings access for sled trees (and, via deref, `sled::Db`)
pub trait SettingsExt {
    /// Store `value` under `key`, replacing any previous value
    fn write_setting<V: Serialize + ?Sized>(&self, key: &str, value: &V)
        -> Result<(), ContextError>;

    /// Read and decode the value under `key`
    fn read_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ContextError>;

    /// All settings in key order
    fn settings(&self) -> Result<Vec<(String, serde_json::Value)>, ContextError>;
}

impl SettingsExt for sled::Tree {
    fn write_setting<V: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &V,
    ) -> Result<(), ContextError> {
        let encoded = serde_json::to_vec(value)?;
        self.insert(key.as_bytes(), encoded)?;
        debug!(key, "Wrote setting");
        Ok(())
    }

    fn read_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ContextError> {
        let Some(raw) = self.get(key.as_bytes())? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    fn settings(&self) -> Result<Vec<(String, serde_json::Value)>, ContextError> {
        let mut out = Vec::new();
        for item in self.iter() {
            let (key, value) = item?;
            let key = String::from_utf8_lossy(&key).into_owned();
            out.push((key, serde_json::from_slice(&value)?));
        }
        Ok(out)
    }
}

fn flush_on_exit(tree: &sled::Tree, failure: Option<&ContextError>) -> Result<(), ContextError> {
    if let Some(err) = failure {
        warn!(error = %err, "Settings scope failed, flushing partial writes");
    }
    let bytes = tree.flush()?;
    debug!(bytes, "Flushed settings store");
    Ok(())
}

impl ResourceContext for sled::Tree {
    type Error = ContextError;

    fn exit(&mut self, failure: Option<&ContextError>) -> Result<(), ContextError> {
        flush_on_exit(self, failure)
    }
}

impl ResourceContext for sled::Db {
    type Error = ContextError;

    fn exit(&mut self, failure: Option<&ContextError>) -> Result<(), ContextError> {
        flush_on_exit(self, failure)
    }
}
