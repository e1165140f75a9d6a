//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "construct a project".

pub mod construct_service;

pub use construct_service::{
    ConstructService, GenerationOutcome, GenerationReport, GenerationState, Message,
    PrepareOutcome, PreparedGeneration,
};
