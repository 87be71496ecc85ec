//! Scoped-With: Scoped Resource Acquisition
//!
//! Runs a block of work between a resource's `enter` and `exit` hooks and
//! guarantees `exit` sees how the block ended. Ships three resource contexts:
//! a file reader, a one-shot settings writer, and sled stores themselves.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;
pub mod scope;

pub use error::ContextError;
pub use scope::{try_with, with, ResourceContext, ScopeExt};
