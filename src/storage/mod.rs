//! Storage Abstraction Layer
//!
//! The only thing the game persists is the key-binding preference, but it
//! goes through a small backend trait so the same code runs on every host:
//! - Native: files under the platform config directory (`LocalStorage`)
//! - WASM: the browser's `localStorage` (`WebStorage`)
//! - Tests: an in-memory map (`MemoryStorage`)
//!
//! All operations complete immediately; there is no async backend.

#[cfg(not(target_arch = "wasm32"))]
pub mod local;
#[cfg(test)]
pub mod memory;
#[cfg(any(target_arch = "wasm32", test))]
pub mod web;
mod key_bindings;

#[cfg(not(target_arch = "wasm32"))]
pub use local::LocalStorage;
#[cfg(test)]
pub use memory::MemoryStorage;
#[cfg(any(target_arch = "wasm32", test))]
pub use web::WebStorage;
pub use key_bindings::KeyBindingStore;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("I/O error: {0}")]
    Io(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

/// A flat key/value store addressed by relative paths
pub trait Storage {
    /// Read a file's bytes
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite a file
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete(&mut self, path: &str) -> Result<(), StorageError>;

    fn exists(&self, path: &str) -> bool;

    /// Read a file as a UTF-8 string
    fn read_string(&self, path: &str) -> Result<String, StorageError> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| StorageError::Serde(e.to_string()))
    }

    /// Write a string to a file
    fn write_string(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        self.write(path, content.as_bytes())
    }
}
