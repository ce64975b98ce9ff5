//! Key-value storage for the remembered identity
//!
//! The controller only needs `get` and `set` on raw strings. On the web this
//! is `window.localStorage`; everywhere else (and in tests) it is an
//! in-memory map.

use std::cell::RefCell;
use std::collections::HashMap;

/// Persistent string store keyed by string
pub trait KeyValueStore {
    /// Stored value, or `None` when the key is absent
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing anything already there
    fn set(&self, key: &str, value: &str);
}

/// In-memory store, shared through `Rc` by the submit handler
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's LocalStorage
    pub fn open() -> crate::Result<Self> {
        use crate::AutofillError;

        let window = web_sys::window().ok_or(AutofillError::NoWindow)?;
        let storage = window
            .local_storage()
            .ok()
            .flatten()
            .ok_or(AutofillError::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            log::warn!("Failed to write '{}' to LocalStorage", key);
        }
    }
}
