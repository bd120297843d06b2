//! Infrastructure traits for abstracting I/O operations.
//!
//! Configuration and artifact loading go through [`FileSystem`] so tests can
//! substitute an in-memory implementation.

use std::fs::ReadDir;
use std::io;
use std::path::Path;

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Read the contents of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<ReadDir>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<ReadDir> {
        std::fs::read_dir(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let fs = RealFileSystem;
        fs.write(&file_path, b"Hello, World!").unwrap();

        let read_content = fs.read_to_string(&file_path).unwrap();
        assert_eq!(read_content, "Hello, World!");
    }

    #[test]
    fn test_real_filesystem_read_dir_lists_entries() {
        let temp_dir = TempDir::new().unwrap();
        let fs = RealFileSystem;
        fs.write(&temp_dir.path().join("a.json"), "{}").unwrap();
        fs.write(&temp_dir.path().join("b.json"), "{}").unwrap();

        let count = fs.read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_real_filesystem_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = RealFileSystem
            .read_to_string(&temp_dir.path().join("missing.toml"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
