//! Process runner adapters.

mod recording;
mod system;

pub use recording::{RecordedCall, RecordingProcessRunner, Scripted};
pub use system::SystemProcessRunner;
