//! Raised failures and their cause chains.

use std::fmt;

use crate::domain::kind::KindId;

/// A raised instance of an exception kind.
///
/// `cause` holds the failure that was being handled when this one was
/// raised; `source()` walks the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: KindId,
    pub kind_name: String,
    pub message: String,
    cause: Option<Box<Failure>>,
}

impl Failure {
    pub fn new(kind: KindId, kind_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            kind_name: kind_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// `raise self from cause`: replaces any existing cause.
    pub fn with_cause(mut self, cause: Failure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attach `original` at the end of the chain, keeping causes already set.
    pub fn chained_to(mut self, original: Failure) -> Self {
        self.append_cause(original);
        self
    }

    fn append_cause(&mut self, original: Failure) {
        match self.cause {
            Some(ref mut next) => next.append_cause(original),
            None => self.cause = Some(Box::new(original)),
        }
    }

    pub fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }

    /// This failure followed by every cause, innermost last.
    pub fn chain(&self) -> impl Iterator<Item = &Failure> {
        std::iter::successors(Some(self), |f| f.cause())
    }

    /// The failure at the end of the cause chain.
    pub fn root_cause(&self) -> &Failure {
        self.chain().last().unwrap_or(self)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind_name)
        } else {
            write!(f, "{}: {}", self.kind_name, self.message)
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
