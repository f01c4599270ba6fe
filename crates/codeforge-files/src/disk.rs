//! On-disk adapter with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{FileError, FileWriteError};
use crate::file_system::FileSystem;

/// [`FileSystem`] backed by the real disk, rooted at a workspace directory
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written file.
///
/// # Example
///
/// ```ignore
/// use codeforge_files::{DiskFileSystem, FileSystem};
///
/// let fs = DiskFileSystem::new("/path/to/workspace");
/// fs.write_file(Path::new("libs/user/src/index.ts"), "export {}\n")?;
/// ```
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    root: PathBuf,
}

impl DiskFileSystem {
    /// Create an adapter rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Generates a temporary file path next to `path`
    fn temp_path(path: &Path) -> PathBuf {
        let mut temp_path = path.to_path_buf();
        let file_name = format!(
            ".tmp-{}-{}",
            Uuid::new_v4(),
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("file")
        );
        temp_path.set_file_name(file_name);
        temp_path
    }
}

impl FileSystem for DiskFileSystem {
    fn write_file(&self, path: &Path, content: &str) -> Result<(), FileWriteError> {
        let target = self.resolve(path);

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| FileWriteError::new(&target, e))?;
            }
        }

        let temp_path = Self::temp_path(&target);
        fs::write(&temp_path, content).map_err(|e| FileWriteError::new(&target, e))?;
        if let Err(e) = fs::rename(&temp_path, &target) {
            let _ = fs::remove_file(&temp_path);
            return Err(FileWriteError::new(&target, e));
        }

        debug!(path = %target.display(), bytes = content.len(), "File written");
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FileError> {
        let target = self.resolve(path);
        fs::read_to_string(&target).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(target.clone()),
            _ => FileError::Io {
                path: target.clone(),
                source: e,
            },
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn make_directory(&self, path: &Path) -> Result<(), FileError> {
        let target = self.resolve(path);
        fs::create_dir_all(&target).map_err(|e| FileError::Io {
            path: target.clone(),
            source: e,
        })
    }

    fn workspace_root(&self) -> &Path {
        &self.root
    }
}
