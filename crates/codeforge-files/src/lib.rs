#![warn(missing_docs)]

//! File-system adapters for codeforge
//!
//! Generation code only ever talks to the [`FileSystem`] trait. Two adapters
//! ship here: [`DiskFileSystem`], rooted at a workspace directory and writing
//! atomically, and [`MemoryFileSystem`], an in-memory tree used by tests and
//! dry runs.

pub mod disk;
pub mod error;
pub mod file_system;
pub mod memory;

// Re-export public API
pub use disk::DiskFileSystem;
pub use error::{FileError, FileWriteError};
pub use file_system::FileSystem;
pub use memory::MemoryFileSystem;
