//! Local filesystem storage backend
//!
//! Provides storage operations on the local filesystem, rooted at a base
//! directory. All operations complete immediately (synchronous).

use super::{Storage, StorageError};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "platform-dash";

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at the user's config directory, falling back to the
    /// current directory when the platform has none.
    pub fn in_config_dir() -> Self {
        let base_dir = match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR),
            None => {
                tracing::warn!("No config directory, storing settings in the working directory");
                PathBuf::from(".")
            }
        };
        Self { base_dir }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path relative to the base directory
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

impl Storage for LocalStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(std::fs::write(&full_path, data)?)
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.resolve(path)) {
            Ok(()) => Ok(()),
            // Not found is OK for delete
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, mut storage) = setup_test_dir();

        let data = b"hello world";
        storage.write("test.txt", data).unwrap();

        assert_eq!(storage.read("test.txt").unwrap(), data);
        assert_eq!(storage.read_string("test.txt").unwrap(), "hello world");
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();

        let result = storage.read("nonexistent.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let (dir, mut storage) = setup_test_dir();

        std::fs::write(dir.path().join("delete_me.txt"), "x").unwrap();

        storage.delete("delete_me.txt").unwrap();
        assert!(!dir.path().join("delete_me.txt").exists());

        // Deleting again should be OK
        assert!(storage.delete("delete_me.txt").is_ok());
    }

    #[test]
    fn test_exists() {
        let (dir, storage) = setup_test_dir();

        std::fs::write(dir.path().join("exists.txt"), "x").unwrap();

        assert!(storage.exists("exists.txt"));
        assert!(!storage.exists("not_exists.txt"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (_dir, mut storage) = setup_test_dir();

        storage.write("deep/nested/dir/file.txt", b"data").unwrap();
        assert_eq!(storage.read("deep/nested/dir/file.txt").unwrap(), b"data");
    }
}
