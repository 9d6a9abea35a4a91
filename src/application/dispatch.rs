//! Exception dispatch: route a failed operation to the first matching handler.
//!
//! Handlers are scanned in registration order and matched by ancestry, so a
//! handler for a base kind catches all of its descendants. Unmatched failures
//! propagate unchanged; a handler that fails itself keeps the original
//! failure in its cause chain.

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::{DomainResult, Failure, KindId, KindRegistry};

/// Recovery action invoked with the caught failure.
pub type Action<'a, T> = Box<dyn FnMut(&Failure) -> Result<T, Failure> + 'a>;

pub struct Handler<'a, T> {
    pub kind: KindId,
    action: Action<'a, T>,
}

impl<T> std::fmt::Debug for Handler<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler").field("kind", &self.kind).finish()
    }
}

/// A handler that can never run because an earlier one catches everything it would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadowed {
    /// Position of the unreachable handler
    pub index: usize,
    /// Position of the earlier handler that masks it
    pub shadowed_by: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// No handler matched; the operation's failure, untouched.
    #[error("unhandled {0}")]
    Unhandled(Failure),

    /// The matched handler failed; the original failure is in its cause chain.
    #[error("{0}")]
    HandlerFailed(Failure),
}

impl DispatchError {
    pub fn failure(&self) -> &Failure {
        match self {
            DispatchError::Unhandled(f) | DispatchError::HandlerFailed(f) => f,
        }
    }

    pub fn into_failure(self) -> Failure {
        match self {
            DispatchError::Unhandled(f) | DispatchError::HandlerFailed(f) => f,
        }
    }
}

/// Ordered handler list bound to one kind registry.
#[derive(Debug)]
pub struct HandlerSet<'a, T> {
    registry: &'a KindRegistry,
    handlers: Vec<Handler<'a, T>>,
}

impl<'a, T> HandlerSet<'a, T> {
    pub fn new(registry: &'a KindRegistry) -> Self {
        Self {
            registry,
            handlers: Vec::new(),
        }
    }

    /// Register a handler after all existing ones.
    ///
    /// Logs a warning when an earlier handler already catches `kind`.
    pub fn on<F>(&mut self, kind: KindId, action: F) -> &mut Self
    where
        F: FnMut(&Failure) -> Result<T, Failure> + 'a,
    {
        if let Some(earlier) = self.first_match(kind) {
            warn!(
                "handler for {} is unreachable: handler #{} ({}) catches it first",
                self.registry.name(kind),
                earlier,
                self.registry.name(self.handlers[earlier].kind)
            );
        }
        self.handlers.push(Handler {
            kind,
            action: Box::new(action),
        });
        self
    }

    /// Register a handler by kind name.
    pub fn on_named<F>(&mut self, name: &str, action: F) -> DomainResult<&mut Self>
    where
        F: FnMut(&Failure) -> Result<T, Failure> + 'a,
    {
        let kind = self.registry.resolve(name)?;
        Ok(self.on(kind, action))
    }

    pub fn registry(&self) -> &'a KindRegistry {
        self.registry
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler kinds in registration order.
    pub fn kinds(&self) -> Vec<KindId> {
        self.handlers.iter().map(|h| h.kind).collect()
    }

    /// Index of the first handler that catches `raised`.
    pub fn first_match(&self, raised: KindId) -> Option<usize> {
        self.handlers
            .iter()
            .position(|h| self.registry.matches(h.kind, raised))
    }

    /// Every handler masked by an earlier one (same kind or an ancestor kind).
    pub fn unreachable(&self) -> Vec<Shadowed> {
        self.handlers
            .iter()
            .enumerate()
            .filter_map(|(index, handler)| {
                self.handlers[..index]
                    .iter()
                    .position(|earlier| self.registry.matches(earlier.kind, handler.kind))
                    .map(|shadowed_by| Shadowed { index, shadowed_by })
            })
            .collect()
    }

    /// Run `operation`; on failure invoke the first matching handler once.
    #[instrument(level = "debug", skip_all, fields(handlers = self.handlers.len()))]
    pub fn dispatch<F>(&mut self, operation: F) -> Result<T, DispatchError>
    where
        F: FnOnce() -> Result<T, Failure>,
    {
        let failure = match operation() {
            Ok(value) => return Ok(value),
            Err(failure) => failure,
        };

        let Some(index) = self.first_match(failure.kind) else {
            debug!("no handler for {}, propagating", failure);
            return Err(DispatchError::Unhandled(failure));
        };

        debug!(
            "{} caught by handler #{} ({})",
            failure,
            index,
            self.registry.name(self.handlers[index].kind)
        );
        (self.handlers[index].action)(&failure).map_err(|raised| {
            debug!("handler #{} raised {} while handling {}", index, raised, failure);
            DispatchError::HandlerFailed(raised.chained_to(failure))
        })
    }
}

/// Free-function form of [`HandlerSet::dispatch`].
pub fn dispatch<T, F>(operation: F, handlers: &mut HandlerSet<'_, T>) -> Result<T, DispatchError>
where
    F: FnOnce() -> Result<T, Failure>,
{
    handlers.dispatch(operation)
}
