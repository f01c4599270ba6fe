//! Property-based tests for the file-system adapters
//! **Covers: disk and memory adapters agree on read-after-write, the last
//! write wins, and atomic writes leave no temporary files behind**

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use codeforge_files::{DiskFileSystem, FileSystem, MemoryFileSystem};

/// Strategy for relative paths one to three segments deep
fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z][a-z0-9]{0,5}", 1..4).prop_map(|segments| {
        let mut path: PathBuf = segments.iter().collect();
        path.set_extension("ts");
        path
    })
}

/// Strategy for a batch of writes; later entries may overwrite earlier ones.
/// Directories never carry an extension, so no file shadows a directory.
fn writes_strategy() -> impl Strategy<Value = Vec<(PathBuf, String)>> {
    prop::collection::vec((relative_path_strategy(), "[ -~\n]{0,40}"), 1..8)
}

proptest! {
    /// Property: both adapters return the last content written to each path
    #[test]
    fn prop_adapters_agree_on_last_write(writes in writes_strategy()) {
        let dir = TempDir::new().unwrap();
        let disk = DiskFileSystem::new(dir.path());
        let memory = MemoryFileSystem::new(dir.path());

        let mut expected = BTreeMap::new();
        for (path, content) in &writes {
            let on_disk = disk.write_file(path, content);
            let in_memory = memory.write_file(path, content);
            prop_assert_eq!(on_disk.is_ok(), in_memory.is_ok());
            if on_disk.is_ok() {
                expected.insert(path.clone(), content.clone());
            }
        }

        for (path, content) in &expected {
            prop_assert_eq!(&disk.read_file(path).unwrap(), content);
            prop_assert_eq!(&memory.read_file(path).unwrap(), content);
        }
    }

    /// Property: the memory write log records every successful write in order
    #[test]
    fn prop_write_log_matches_write_order(writes in writes_strategy()) {
        let memory = MemoryFileSystem::new("/workspace");

        let mut written = Vec::new();
        for (path, content) in &writes {
            if memory.write_file(path, content).is_ok() {
                written.push(Path::new("/workspace").join(path));
            }
        }
        prop_assert_eq!(memory.write_log(), written);
    }

    /// Property: disk writes never leave temporary siblings behind
    #[test]
    fn prop_disk_writes_leave_no_temp_files(writes in writes_strategy()) {
        let dir = TempDir::new().unwrap();
        let disk = DiskFileSystem::new(dir.path());

        for (path, content) in &writes {
            let _ = disk.write_file(path, content);
        }

        let mut pending = vec![dir.path().to_path_buf()];
        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    let name = path.file_name().unwrap().to_string_lossy().to_string();
                    prop_assert!(!name.starts_with(".tmp-"), "leftover {}", name);
                }
            }
        }
    }
}
