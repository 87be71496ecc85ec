//! Error types for scoped resource contexts.

use thiserror::Error;

/// Errors raised by resource contexts and the blocks run inside them
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Resource is closed")]
    Closed,

    #[error("Resource has not been entered")]
    NotEntered,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure raised by a work block itself
    #[error("Block failed: {0}")]
    Block(String),
}

impl ContextError {
    /// Shorthand for a block failure with the given message
    pub fn block(msg: impl Into<String>) -> Self {
        ContextError::Block(msg.into())
    }
}

impl From<sled::Error> for ContextError {
    fn from(err: sled::Error) -> Self {
        ContextError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> Self {
        ContextError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::Config(err.to_string())
    }
}
