//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not input
//! problems. Input problems are `DomainError`s or resolver warnings.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while executing a generation plan.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("Adapter state is unavailable (lock poisoned)")]
    StoreLockError,

    /// Neither the override directory nor the stub store knows this stub.
    #[error("Stub not found: {name}")]
    StubNotFound { name: String },

    /// An external program could not be started.
    #[error("Failed to run `{command}`: {reason}")]
    ProcessFailed { command: String, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StubNotFound { name } => vec![
                format!("No stub named '{name}' in the stub directory or the built-in set"),
                "Check the stubs.directory setting: construct config get stubs.directory".into(),
            ],
            Self::ProcessFailed { command, .. } => vec![
                format!("Make sure `{command}` is installed and on your PATH"),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists and is not empty: {}", path.display()),
                "Use --force to generate into it anyway".into(),
                "Choose a different project name or --path".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::StoreLockError | Self::ProcessFailed { .. } => ErrorCategory::Internal,
            Self::StubNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
