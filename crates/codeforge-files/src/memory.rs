//! In-memory adapter

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{FileError, FileWriteError};
use crate::file_system::FileSystem;

/// [`FileSystem`] that keeps every file in memory
///
/// Paths are normalized (`.` and `..` folded) after resolution so the same
/// file is reachable through equivalent spellings. Writes to paths registered
/// with [`MemoryFileSystem::fail_writes_to`] fail with `PermissionDenied`,
/// which lets tests exercise write-failure handling.
#[derive(Debug)]
pub struct MemoryFileSystem {
    root: PathBuf,
    files: RwLock<BTreeMap<PathBuf, String>>,
    directories: RwLock<BTreeSet<PathBuf>>,
    failing: RwLock<HashSet<PathBuf>>,
    write_log: RwLock<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    /// Create an empty tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = normalize(&root.into());
        let mut directories = BTreeSet::new();
        directories.insert(root.clone());
        Self {
            root,
            files: RwLock::new(BTreeMap::new()),
            directories: RwLock::new(directories),
            failing: RwLock::new(HashSet::new()),
            write_log: RwLock::new(Vec::new()),
        }
    }

    /// Make every later write to `path` fail
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        let target = normalize(&self.resolve(path.as_ref()));
        self.failing.write().insert(target);
    }

    /// Snapshot of all files, keyed by absolute path
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.read().clone()
    }

    /// Absolute paths in the order they were successfully written
    pub fn write_log(&self) -> Vec<PathBuf> {
        self.write_log.read().clone()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        normalize(&self.resolve(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn write_file(&self, path: &Path, content: &str) -> Result<(), FileWriteError> {
        let target = self.absolute(path);

        if self.failing.read().contains(&target) {
            return Err(FileWriteError::new(
                target,
                io::Error::new(io::ErrorKind::PermissionDenied, "write rejected"),
            ));
        }
        if self.directories.read().contains(&target) {
            return Err(FileWriteError::new(
                target,
                io::Error::new(io::ErrorKind::Other, "path is a directory"),
            ));
        }

        {
            let mut directories = self.directories.write();
            let mut ancestor = target.parent();
            while let Some(dir) = ancestor {
                directories.insert(dir.to_path_buf());
                ancestor = dir.parent();
            }
        }
        self.files.write().insert(target.clone(), content.to_string());
        self.write_log.write().push(target);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FileError> {
        let target = self.absolute(path);
        self.files
            .read()
            .get(&target)
            .cloned()
            .ok_or(FileError::NotFound(target))
    }

    fn exists(&self, path: &Path) -> bool {
        let target = self.absolute(path);
        self.files.read().contains_key(&target) || self.directories.read().contains(&target)
    }

    fn make_directory(&self, path: &Path) -> Result<(), FileError> {
        let target = self.absolute(path);
        if self.files.read().contains_key(&target) {
            return Err(FileError::InvalidPath(format!(
                "{} is a file",
                target.display()
            )));
        }
        let mut directories = self.directories.write();
        let mut current = Some(target.as_path());
        while let Some(dir) = current {
            directories.insert(dir.to_path_buf());
            current = dir.parent();
        }
        Ok(())
    }

    fn workspace_root(&self) -> &Path {
        &self.root
    }
}

/// Fold `.` and `..` components without touching the real file system
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
