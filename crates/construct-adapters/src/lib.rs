//! Infrastructure adapters for Construct.
//!
//! This crate implements the ports defined in `construct-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod stubs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordedCall, RecordingProcessRunner, Scripted, SystemProcessRunner};
pub use stubs::EmbeddedStubs;
