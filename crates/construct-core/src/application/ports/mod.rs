//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `construct-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External programs (git, composer, php)
//!   - `StubStore`: Built-in stub texts
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, ProcessOutput, ProcessRunner, StubStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockProcessRunner, MockStubStore};
