//! Application layer for Construct.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ConstructService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All decisions live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConstructService, GenerationOutcome, GenerationReport, GenerationState, Message,
    PrepareOutcome, PreparedGeneration,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProcessOutput, ProcessRunner, StubStore};

pub use error::ApplicationError;
