//! Construct Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Construct, a
//! generator for PHP package skeletons, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          construct-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ConstructService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ProcessRunner, StubStore)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   construct-adapters (Infrastructure)   │
//! │ (LocalFilesystem, EmbeddedStubs, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectName, OptionResolver, Plan)     │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use construct_core::prelude::*;
//!
//! let service = ConstructService::new(filesystem, runner, stubs, OptionTables::builtin());
//! let env = RuntimeEnvironment::new(PhpVersion::fallback(), 2026);
//! let request = ProjectRequest::new("vendor/project").with_license(Some("MIT".into()));
//!
//! match service.generate(&request, &env, Path::new("."), false)? {
//!     GenerationOutcome::NameInvalid(warning) => println!("Warning: {warning}"),
//!     GenerationOutcome::Completed(report) => {
//!         for message in &report.messages {
//!             println!("{}", message.text());
//!         }
//!     }
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConstructService, GenerationOutcome, GenerationReport, GenerationState, Message,
        PrepareOutcome, PreparedGeneration,
        ports::{Filesystem, ProcessOutput, ProcessRunner, StubStore},
    };
    pub use crate::domain::{
        Author, CommandSpec, FileOp, GenerationPlan, Hook, Integrations, OptionTables, PhpVersion,
        ProjectName, ProjectRequest, ResolvedOptions, RuntimeEnvironment, Warning,
    };
    pub use crate::error::{ConstructError, ConstructResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
