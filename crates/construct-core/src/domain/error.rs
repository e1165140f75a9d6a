// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Only the name check aborts a run; every other input problem is turned
/// into a [`crate::domain::Warning`] by the resolver. The remaining variants
/// are invariant violations caught while building or validating a plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("\"{name}\" is not a valid project name, please use \"vendor/project\"")]
    InvalidProjectName { name: String },

    #[error("Duplicate path in generation plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Table / Catalog Errors
    // ========================================================================
    #[error("Default {kind} '{id}' is missing from the option table")]
    MissingDefault { kind: &'static str, id: String },

    #[error("Failed to render {what}: {reason}")]
    RenderFailed { what: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name } => vec![
                format!("'{name}' must look like vendor/project"),
                "Example: construct generate acme/http-client".into(),
            ],
            Self::MissingDefault { kind, id } => vec![
                format!("The {kind} table has no entry '{id}'"),
                "Add the default entry to the table or pick another default".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
            Self::MissingDefault { .. } => ErrorCategory::Configuration,
            Self::RenderFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
