//! Read-only file handle context. `exit` closes the handle.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ContextError;
use crate::scope::ResourceContext;

/// File handle opened for reading, closed when its scope exits
#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    handle: Option<File>,
}

impl FileReader {
    /// Open `path` for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContextError> {
        let path = path.as_ref().to_path_buf();
        let handle = File::open(&path)?;
        Ok(Self {
            path,
            handle: Some(handle),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Read the remaining bytes
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        let handle = self.handle.as_mut().ok_or(ContextError::Closed)?;
        let mut buf = Vec::new();
        handle.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read the remaining bytes as UTF-8 text
    pub fn read_to_string(&mut self) -> Result<String, ContextError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            ContextError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl ResourceContext for FileReader {
    type Error = ContextError;

    fn exit(&mut self, failure: Option<&ContextError>) -> Result<(), ContextError> {
        if let Some(err) = failure {
            warn!(path = %self.path.display(), error = %err, "File read scope failed");
        }
        // Dropping the handle closes it
        if self.handle.take().is_some() {
            debug!(path = %self.path.display(), "Closed file handle");
        }
        Ok(())
    }
}
