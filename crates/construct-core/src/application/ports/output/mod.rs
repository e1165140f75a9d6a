//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `construct-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::CommandSpec;
use crate::error::ConstructResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `construct_adapters::filesystem::LocalFilesystem` (production)
/// - `construct_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir(&self, path: &Path) -> ConstructResult<()>;

    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// True when `path` is a directory with no entries.
    fn is_empty_dir(&self, path: &Path) -> ConstructResult<bool>;

    fn copy_file(&self, from: &Path, to: &Path) -> ConstructResult<()>;

    fn move_file(&self, from: &Path, to: &Path) -> ConstructResult<()>;

    fn read_file(&self, path: &Path) -> ConstructResult<String>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &str) -> ConstructResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ConstructResult<()>;
}

/// What a finished process reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// An output with the given exit code and nothing captured.
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best short explanation of a failure: stderr, else stdout, else the code.
    pub fn failure_reason(&self) -> String {
        [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .and_then(|text| text.lines().next())
            .map(String::from)
            .unwrap_or_else(|| match self.code {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".into(),
            })
    }
}

/// Port for running external programs (git, composer, php).
///
/// A program that starts and exits non-zero is an `Ok` output; only a
/// failure to start at all is an `Err`.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> ConstructResult<ProcessOutput>;
}

/// Port for the built-in stub texts.
#[cfg_attr(test, mockall::automock)]
pub trait StubStore: Send + Sync {
    fn get(&self, name: &str) -> ConstructResult<String>;

    fn contains(&self, name: &str) -> bool;
}
