//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use construct_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ConstructError, ConstructResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> ConstructResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_empty_dir(&self, path: &Path) -> ConstructResult<bool> {
        let mut entries =
            fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ConstructResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn move_file(&self, from: &Path, to: &Path) -> ConstructResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "move file"))
    }

    fn read_file(&self, path: &Path) -> ConstructResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ConstructResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_dir_all(&self, path: &Path) -> ConstructResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ConstructError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
