//! Process runner backed by `std::process::Command`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use construct_core::{
    application::{ApplicationError, ports::{ProcessOutput, ProcessRunner}},
    domain::CommandSpec,
    error::ConstructResult,
};

/// Runs programs on the host, capturing stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> ConstructResult<ProcessOutput> {
        debug!(%command, dir = %working_dir.display(), "Running");

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if !working_dir.as_os_str().is_empty() {
            process.current_dir(working_dir);
        }

        let output = process.output().map_err(|e| ApplicationError::ProcessFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
