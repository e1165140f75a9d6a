//! Unified error handling for Construct Core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Construct Core operations.
#[derive(Debug, Error, Clone)]
pub enum ConstructError {
    /// Errors from the domain layer (invalid input, broken invariants).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and process failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ConstructError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
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
pub type ConstructResult<T> = Result<T, ConstructError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_display_transparently() {
        let err: ConstructError = DomainError::InvalidProjectName {
            name: "nope".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "\"nope\" is not a valid project name, please use \"vendor/project\""
        );
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn project_exists_suggests_force() {
        let err: ConstructError = ApplicationError::ProjectExists {
            path: PathBuf::from("project"),
        }
        .into();
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn missing_stub_is_not_found() {
        let err: ConstructError = ApplicationError::StubNotFound {
            name: "README.stub".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn io_failures_are_internal() {
        let err: ConstructError = ApplicationError::FilesystemError {
            path: PathBuf::from("project/README.md"),
            reason: "disk full".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("disk full"));
    }
}
