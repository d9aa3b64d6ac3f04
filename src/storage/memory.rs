//! In-memory storage backend
//!
//! Test double for the other backends. Contents live as long as the value
//! does.

use std::collections::HashMap;
use super::{Storage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        self.files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        self.files.remove(path);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_delete() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.write("a.ron", b"(x: 1)").unwrap();
        assert!(storage.exists("a.ron"));
        assert_eq!(storage.read("a.ron").unwrap(), b"(x: 1)");

        storage.delete("a.ron").unwrap();
        storage.delete("a.ron").unwrap();
        assert!(!storage.exists("a.ron"));
        assert_eq!(storage.read("a.ron"), Err(StorageError::NotFound("a.ron".to_string())));
    }
}
