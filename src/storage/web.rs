//! Browser storage backend
//!
//! Keeps files in the page's `localStorage` so settings survive a reload.
//! The JS side is a miniquad plugin in `web/index.html`; every key is
//! namespaced there, so paths here are plain relative names. Values are
//! stored as text, which is all the game writes.

use super::{Storage, StorageError};

// ─────────────────────────────────────────────────────────────────────────────
// FFI bindings to the JavaScript storage plugin (WASM only)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
mod ffi {
    extern "C" {
        /// Byte length of the stored value, or -1 when absent
        fn pd_storage_len(key_ptr: *const u8, key_len: usize) -> i32;
        fn pd_storage_copy(key_ptr: *const u8, key_len: usize, dest_ptr: *mut u8, max_len: usize) -> usize;
        /// 1 on success, 0 when the browser refused (quota, private mode)
        fn pd_storage_set(key_ptr: *const u8, key_len: usize, value_ptr: *const u8, value_len: usize) -> i32;
        fn pd_storage_remove(key_ptr: *const u8, key_len: usize);
    }

    pub fn get(key: &str) -> Option<Vec<u8>> {
        let len = unsafe { pd_storage_len(key.as_ptr(), key.len()) };
        if len < 0 {
            return None;
        }
        let mut buf = vec![0u8; len as usize];
        let copied = unsafe { pd_storage_copy(key.as_ptr(), key.len(), buf.as_mut_ptr(), buf.len()) };
        buf.truncate(copied);
        Some(buf)
    }

    pub fn contains(key: &str) -> bool {
        unsafe { pd_storage_len(key.as_ptr(), key.len()) >= 0 }
    }

    pub fn set(key: &str, value: &str) -> bool {
        unsafe { pd_storage_set(key.as_ptr(), key.len(), value.as_ptr(), value.len()) == 1 }
    }

    pub fn remove(key: &str) {
        unsafe { pd_storage_remove(key.as_ptr(), key.len()) }
    }
}

// Native test builds: a per-thread map standing in for `localStorage`
#[cfg(not(target_arch = "wasm32"))]
mod ffi {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static ITEMS: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get(key: &str) -> Option<Vec<u8>> {
        ITEMS.with(|items| items.borrow().get(key).map(|v| v.as_bytes().to_vec()))
    }

    pub fn contains(key: &str) -> bool {
        ITEMS.with(|items| items.borrow().contains_key(key))
    }

    pub fn set(key: &str, value: &str) -> bool {
        ITEMS.with(|items| items.borrow_mut().insert(key.to_string(), value.to_string()));
        true
    }

    pub fn remove(key: &str) {
        ITEMS.with(|items| items.borrow_mut().remove(key));
    }
}

/// `localStorage` backend. Holds no state of its own; every handle sees the
/// same browser store.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for WebStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        ffi::get(path).ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let text = std::str::from_utf8(data).map_err(|e| StorageError::Serde(e.to_string()))?;
        if ffi::set(path, text) {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied(format!("browser refused to store {}", path)))
        }
    }

    fn delete(&mut self, path: &str) -> Result<(), StorageError> {
        ffi::remove(path);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        ffi::contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;
    use crate::storage::KeyBindingStore;

    #[test]
    fn test_read_write_delete() {
        let mut storage = WebStorage::new();
        assert!(!storage.exists("settings.ron"));
        assert!(matches!(storage.read("settings.ron"), Err(StorageError::NotFound(_))));

        storage.write_string("settings.ron", "(volume: 3)").unwrap();
        assert!(storage.exists("settings.ron"));
        assert_eq!(storage.read_string("settings.ron").unwrap(), "(volume: 3)");

        storage.delete("settings.ron").unwrap();
        storage.delete("settings.ron").unwrap();
        assert!(!storage.exists("settings.ron"));
    }

    #[test]
    fn test_binary_data_rejected() {
        let mut storage = WebStorage::new();
        assert!(matches!(storage.write("blob", &[0xff, 0x00]), Err(StorageError::Serde(_))));
        assert!(!storage.exists("blob"));
    }

    #[test]
    fn test_bindings_survive_reload() {
        let mut store = KeyBindingStore::load(WebStorage::new());
        store.set_key(Action::Dash, "Shift").unwrap();
        drop(store);

        // A fresh handle, as after a page reload
        let reloaded = KeyBindingStore::load(WebStorage::new());
        assert_eq!(reloaded.bindings().get(Action::Dash), "Shift");
    }
}
