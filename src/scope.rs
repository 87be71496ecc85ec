//! Scoped Context Runner
//!
//! Runs a block of work between a resource's `enter` and `exit` hooks. Once a
//! resource is present, `exit` runs exactly once, whatever the block returns.
//! Block failures reach `exit` as data (`Option<&Error>`), never by unwinding.
//!
//! Two runners share the same sequencing:
//! - [`with`] delivers the failure to `exit` and stops there; the caller sees `()`.
//! - [`try_with`] also hands the failure back to the caller after `exit` has seen it.

use std::fmt::Display;
use tracing::{debug, error};

/// A value with setup and teardown hooks around a scoped unit of work.
///
/// Lifecycle: constructed by the caller, `enter` makes it active, the block
/// runs while active, `exit` releases it. Use after `exit` is unspecified.
pub trait ResourceContext {
    type Error;

    /// Setup before the block runs. No-op by default.
    fn enter(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Teardown after the block, called exactly once with the block failure, if any.
    ///
    /// A returned error reports a failed teardown (a flush that did not land, say),
    /// not the block failure being passed in.
    fn exit(&mut self, failure: Option<&Self::Error>) -> Result<(), Self::Error>;
}

impl<T: ResourceContext + ?Sized> ResourceContext for &mut T {
    type Error = T::Error;

    fn enter(&mut self) -> Result<(), Self::Error> {
        (**self).enter()
    }

    fn exit(&mut self, failure: Option<&Self::Error>) -> Result<(), Self::Error> {
        (**self).exit(failure)
    }
}

/// Run `block` inside `resource`, delivering any failure to `exit` only.
///
/// An absent resource skips everything: no `enter`, no block, no `exit`.
/// The block failure is not returned; use [`try_with`] when the caller needs it.
pub fn with<C, F>(resource: Option<C>, block: F)
where
    C: ResourceContext,
    C::Error: Display,
    F: FnOnce(&mut C) -> Result<(), C::Error>,
{
    let Some(mut resource) = resource else {
        debug!("No resource present, skipping scope");
        return;
    };

    let (_, teardown) = run_scope(&mut resource, block);
    if let Err(err) = teardown {
        error!(error = %err, "Scoped context teardown failed");
    }
}

/// Run `block` inside `resource` and return its outcome after `exit` has run.
///
/// `Ok(None)` means the resource was absent. The block failure takes precedence
/// over a teardown failure; the latter is then only logged.
pub fn try_with<C, R, F>(resource: Option<C>, block: F) -> Result<Option<R>, C::Error>
where
    C: ResourceContext,
    C::Error: Display,
    F: FnOnce(&mut C) -> Result<R, C::Error>,
{
    let Some(mut resource) = resource else {
        debug!("No resource present, skipping scope");
        return Ok(None);
    };

    let (outcome, teardown) = run_scope(&mut resource, block);
    settle(outcome, teardown).map(Some)
}

/// Method-call form of the runners for any resource context.
pub trait ScopeExt: ResourceContext + Sized {
    /// `with(Some(self), block)`
    fn scoped<F>(self, block: F)
    where
        Self::Error: Display,
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        with(Some(self), block)
    }

    /// `try_with(Some(self), block)` without the absent case
    fn try_scoped<R, F>(mut self, block: F) -> Result<R, Self::Error>
    where
        Self::Error: Display,
        F: FnOnce(&mut Self) -> Result<R, Self::Error>,
    {
        let (outcome, teardown) = run_scope(&mut self, block);
        settle(outcome, teardown)
    }
}

impl<T: ResourceContext> ScopeExt for T {}

/// enter, block, exit. A failed `enter` skips the block and goes to `exit` as the failure.
fn run_scope<C, R, F>(resource: &mut C, block: F) -> (Result<R, C::Error>, Result<(), C::Error>)
where
    C: ResourceContext,
    F: FnOnce(&mut C) -> Result<R, C::Error>,
{
    debug!("Entering scoped context");
    let outcome = match resource.enter() {
        Ok(()) => block(resource),
        Err(err) => Err(err),
    };

    debug!(failed = outcome.is_err(), "Exiting scoped context");
    let teardown = resource.exit(outcome.as_ref().err());
    (outcome, teardown)
}

fn settle<R, E: Display>(outcome: Result<R, E>, teardown: Result<(), E>) -> Result<R, E> {
    match (outcome, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(teardown)) => Err(teardown),
        (Err(failure), Ok(())) => Err(failure),
        (Err(failure), Err(teardown)) => {
            error!(error = %teardown, "Scoped context teardown failed after block failure");
            Err(failure)
        }
    }
}
