//! The narrow file-system contract generation depends on

use std::path::{Path, PathBuf};

use crate::error::{FileError, FileWriteError};

/// File-system operations needed to persist generated files
///
/// Implementations decide what a path means (real disk, in-memory tree); the
/// orchestrator only relies on this shape. Relative paths are resolved against
/// [`FileSystem::workspace_root`].
pub trait FileSystem: Send + Sync {
    /// Write `content` to `path`, replacing any previous content
    fn write_file(&self, path: &Path, content: &str) -> Result<(), FileWriteError>;

    /// Read the full content of `path`
    fn read_file(&self, path: &Path) -> Result<String, FileError>;

    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents
    fn make_directory(&self, path: &Path) -> Result<(), FileError>;

    /// Root directory relative paths resolve against
    fn workspace_root(&self) -> &Path;

    /// Resolve `path` against the workspace root (absolute paths pass through)
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root().join(path)
        }
    }
}
