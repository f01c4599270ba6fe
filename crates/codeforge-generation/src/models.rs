//! Data models shared by the generation pipeline

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const TYPESCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// A rendered file, owned by one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Absolute target path
    pub path: PathBuf,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Create a generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Whether the path has a TypeScript extension
    pub fn is_typescript(&self) -> bool {
        is_typescript_path(&self.path)
    }
}

/// Whether `path` has a TypeScript extension
pub fn is_typescript_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TYPESCRIPT_EXTENSIONS.contains(&e))
}
