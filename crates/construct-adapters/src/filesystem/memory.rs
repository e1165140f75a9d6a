//! In-memory filesystem adapter for testing.
//!
//! Mirrors a real disk where it matters to the orchestrator: a file can only
//! be written once its parent directory exists, and directories and files
//! never share a path.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use construct_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ConstructResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle and give another to
/// the service.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_dirs(&mut inner, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed an empty directory (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_dirs(&mut inner, path.as_ref());
        }
        self
    }

    /// Make every write to `path` fail (testing helper).
    pub fn fail_writes_to(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.as_ref().to_path_buf());
        }
        self
    }

    /// A file's content, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories, sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> ConstructResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> ConstructResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_dirs(inner: &mut MemoryFilesystemInner, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        inner.directories.insert(current.clone());
    }
}

fn fs_error(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> ConstructResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "A file exists at this path").into());
        }
        insert_dirs(&mut inner, path);
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> ConstructResult<bool> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Not a directory").into());
        }

        let has_child = |p: &PathBuf| p.parent() == Some(path);
        Ok(!inner.files.keys().any(has_child) && !inner.directories.iter().any(has_child))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ConstructResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)
    }

    fn move_file(&self, from: &Path, to: &Path) -> ConstructResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)?;
        self.write()?.files.remove(from);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ConstructResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file").into())
    }

    fn write_file(&self, path: &Path, content: &str) -> ConstructResult<()> {
        let mut inner = self.write()?;

        if inner.failing_writes.contains(path) {
            return Err(fs_error(path, "Simulated write failure").into());
        }
        if inner.directories.contains(path) {
            return Err(fs_error(path, "Is a directory").into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ConstructResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
