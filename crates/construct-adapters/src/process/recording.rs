//! Scriptable process runner for tests and dry runs.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use construct_core::{
    application::{ApplicationError, ports::{ProcessOutput, ProcessRunner}},
    domain::CommandSpec,
    error::ConstructResult,
};

/// How the runner answers for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    /// Exit 0 with the given stdout.
    Succeed(String),
    /// Exit with the given code and stderr.
    Fail { code: i32, stderr: String },
    /// The program cannot be started at all.
    NotFound,
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: CommandSpec,
    pub working_dir: PathBuf,
}

/// Records every call and answers from a per-program script.
///
/// Programs without a script succeed with empty output. Clones share the
/// same script and call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingProcessRunner {
    inner: Arc<RwLock<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    script: HashMap<String, Scripted>,
    calls: Vec<RecordedCall>,
}

impl RecordingProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `program` with `response`.
    pub fn script(self, program: impl Into<String>, response: Scripted) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.script.insert(program.into(), response);
        }
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner
            .read()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    /// Calls rendered as command lines, e.g. `git init`.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| call.command.to_string())
            .collect()
    }
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> ConstructResult<ProcessOutput> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.calls.push(RecordedCall {
            command: command.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        match inner.script.get(&command.program) {
            None => Ok(ProcessOutput::exited(0)),
            Some(Scripted::Succeed(stdout)) => Ok(ProcessOutput {
                stdout: stdout.clone(),
                ..ProcessOutput::exited(0)
            }),
            Some(Scripted::Fail { code, stderr }) => Ok(ProcessOutput {
                stderr: stderr.clone(),
                ..ProcessOutput::exited(*code)
            }),
            Some(Scripted::NotFound) => Err(ApplicationError::ProcessFailed {
                command: command.to_string(),
                reason: "No such file or directory (os error 2)".into(),
            }
            .into()),
        }
    }
}
