//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::application::dispatch::DispatchError;
use crate::domain::{DomainError, Failure};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("unhandled {0}")]
    Failure(#[from] Failure),

    #[error("invalid declarations in {path}: {message}")]
    Declarations { path: PathBuf, message: String },

    #[error("no declaration file given and none configured")]
    NoDeclarations,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("input error: {message}")]
    Input { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
