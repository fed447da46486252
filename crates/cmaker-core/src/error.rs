//! Unified error handling for cmaker core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cmaker core operations.
///
/// This enum wraps all possible errors that can occur when using cmaker-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum CmakerError {
    /// Errors from the domain layer (catalog lookups, catalog consistency).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (materialization and rendering).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CmakerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in cmaker".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                // A broken catalog is a broken installation, not a bad request.
                crate::domain::ErrorCategory::Catalog => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// `true` when the selection named something the catalog does not have.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_lookup())
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CmakerResult<T> = Result<T, CmakerError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_categories_are_mapped() {
        let lookup: CmakerError = DomainError::UnknownLanguage {
            language: "rust".into(),
        }
        .into();
        assert_eq!(lookup.category(), ErrorCategory::NotFound);
        assert!(lookup.is_lookup());

        let broken: CmakerError = DomainError::InheritanceCycle {
            kind: "a".into(),
            path: vec!["a".into(), "a".into()],
        }
        .into();
        assert_eq!(broken.category(), ErrorCategory::Configuration);
        assert!(!broken.is_lookup());
    }

    #[test]
    fn messages_pass_through_unwrapped() {
        let err: CmakerError = ApplicationError::ProjectExists {
            path: PathBuf::from("demo"),
        }
        .into();
        assert_eq!(err.to_string(), "Project \"demo\" already exists");
    }
}
