//! Persisted key bindings
//!
//! Bindings are saved as RON under `KEY_BINDINGS_PATH`. A missing, corrupt
//! or inconsistent file loads as the defaults; saving failures never take
//! the game down, they are logged and the in-memory bindings stay usable.

use ron::ser::PrettyConfig;
use crate::input::{is_bindable, Action, BindingError, KeyBindings};
use super::{Storage, StorageError};

pub const KEY_BINDINGS_PATH: &str = "key_bindings.ron";

pub struct KeyBindingStore<S: Storage> {
    storage: S,
    bindings: KeyBindings,
}

impl<S: Storage> KeyBindingStore<S> {
    /// Load saved bindings from `storage`, or defaults when there are none
    pub fn load(storage: S) -> Self {
        let bindings = match Self::read(&storage) {
            Ok(Some(bindings)) => bindings,
            Ok(None) => KeyBindings::default(),
            Err(e) => {
                tracing::warn!("Ignoring saved key bindings: {}", e);
                KeyBindings::default()
            }
        };
        Self { storage, bindings }
    }

    fn read(storage: &S) -> Result<Option<KeyBindings>, StorageError> {
        if !storage.exists(KEY_BINDINGS_PATH) {
            return Ok(None);
        }
        let text = storage.read_string(KEY_BINDINGS_PATH)?;
        let bindings: KeyBindings =
            ron::from_str(&text).map_err(|e| StorageError::Serde(e.to_string()))?;
        validate(&bindings)?;
        Ok(Some(bindings))
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        let text = ron::ser::to_string_pretty(&self.bindings, PrettyConfig::default())
            .map_err(|e| StorageError::Serde(e.to_string()))?;
        self.storage.write_string(KEY_BINDINGS_PATH, &text)
    }

    /// Restore the default bindings and save them
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.bindings = KeyBindings::default();
        tracing::info!("Key bindings reset to defaults");
        self.save()
    }

    /// Validate and apply a rebind, then save. A rejected rebind changes
    /// nothing; a failed save keeps the new binding for this session.
    pub fn set_key(&mut self, action: Action, key: &str) -> Result<(), BindingError> {
        self.bindings.set_key(action, key)?;
        tracing::info!("Bound {} to {:?}", action, key);
        if let Err(e) = self.save() {
            tracing::warn!("Could not save key bindings: {}", e);
        }
        Ok(())
    }
}

/// Every key bindable and no key shared between actions
fn validate(bindings: &KeyBindings) -> Result<(), StorageError> {
    for (action, key) in bindings.iter() {
        if !is_bindable(key) {
            return Err(StorageError::Serde(format!("{} bound to unbindable key {:?}", action, key)));
        }
        if bindings.action_for(key) != Some(action) {
            return Err(StorageError::Serde(format!("key {:?} bound twice", key)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_file_loads_defaults() {
        let store = KeyBindingStore::load(MemoryStorage::new());
        assert_eq!(store.bindings(), &KeyBindings::default());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_set_key_persists() {
        let mut store = KeyBindingStore::load(MemoryStorage::new());
        store.set_key(Action::Jump, "ArrowUp").unwrap();

        let reloaded = KeyBindingStore::load(store.storage().clone());
        assert_eq!(reloaded.bindings().get(Action::Jump), "ArrowUp");
        assert_eq!(reloaded.bindings().get(Action::Left), "a");
    }

    #[test]
    fn test_rejected_key_not_saved() {
        let mut store = KeyBindingStore::load(MemoryStorage::new());
        let result = store.set_key(Action::Dash, "a");

        assert!(matches!(result, Err(BindingError::InUse { action: Action::Left, .. })));
        assert_eq!(store.bindings(), &KeyBindings::default());
        assert!(!store.storage().exists(KEY_BINDINGS_PATH));
    }

    #[test]
    fn test_reset() {
        let mut store = KeyBindingStore::load(MemoryStorage::new());
        store.set_key(Action::Dash, "Shift").unwrap();
        store.reset().unwrap();

        let reloaded = KeyBindingStore::load(store.storage().clone());
        assert_eq!(reloaded.bindings(), &KeyBindings::default());
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let mut storage = MemoryStorage::new();
        storage.write_string(KEY_BINDINGS_PATH, "(jump: ").unwrap();
        assert_eq!(KeyBindingStore::load(storage).bindings(), &KeyBindings::default());

        // Parses, but two actions share a key
        let mut storage = MemoryStorage::new();
        storage
            .write_string(KEY_BINDINGS_PATH, r#"(jump: "a", left: "a", right: "d", dash: " ")"#)
            .unwrap();
        assert_eq!(KeyBindingStore::load(storage).bindings(), &KeyBindings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut storage = MemoryStorage::new();
        storage.write_string(KEY_BINDINGS_PATH, r#"(dash: "Shift")"#).unwrap();

        let store = KeyBindingStore::load(storage);
        assert_eq!(store.bindings().get(Action::Dash), "Shift");
        assert_eq!(store.bindings().get(Action::Jump), "w");
    }
}
