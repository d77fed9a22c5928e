//! Root error type of the core crate.
//!
//! Every public operation returns [`NosgResult`]. Variants carry the exact
//! user-facing message; [`NosgError::suggestions`] adds remediation hints.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for nosg core operations.
#[derive(Debug, Error, Clone)]
pub enum NosgError {
    /// Malformed input values.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup, loading and generator lifecycle failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NosgError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in nosg".into(),
                "Please report this issue at: https://github.com/alexistessier/nosg/issues".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Shortcut for matching application variants in callers and tests.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }
}

/// Coarse failure families; front ends map them to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller passed something malformed.
    Validation,
    /// A sources directory or component does not exist.
    NotFound,
    /// A generator did not settle in time.
    Timeout,
    Internal,
}

pub type NosgResult<T> = Result<T, NosgError>;

/// Turn a foreign error into [`NosgError::Internal`] with a prefix.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> NosgResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> NosgResult<T> {
        self.map_err(|e| NosgError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
