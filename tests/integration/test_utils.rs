//! Shared test utilities for integration tests
//!
//! Serializes environment variable mutation across tests and provides a
//! forwarding context that records what `exit` was handed.

use scoped_with::{ContextError, ResourceContext};
use std::sync::Mutex;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with the given environment variables set, restoring them afterwards
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (key, original) in saved {
        match original {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
    result
}

/// Forwards to an inner context and records the failures `exit` receives
pub struct Observed<C> {
    pub inner: C,
    pub entered: usize,
    pub exits: Vec<Option<String>>,
}

impl<C> Observed<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            entered: 0,
            exits: Vec::new(),
        }
    }
}

impl<C: ResourceContext<Error = ContextError>> ResourceContext for Observed<C> {
    type Error = ContextError;

    fn enter(&mut self) -> Result<(), ContextError> {
        self.entered += 1;
        self.inner.enter()
    }

    fn exit(&mut self, failure: Option<&ContextError>) -> Result<(), ContextError> {
        self.exits.push(failure.map(|e| e.to_string()));
        self.inner.exit(failure)
    }
}
