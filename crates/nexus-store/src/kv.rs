//! The durable key-value contract and its in-memory backend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// String-keyed, string-valued durable storage.
///
/// Writes are immediate and last-write-wins; there is no batching. The
/// application is single-threaded, so implementations only need `&self`
/// interior mutability, not `Sync`.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns `true` if an entry was removed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// List stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Decode the JSON value under `key`.
///
/// Returns `Ok(None)` when the key is absent and [`StoreError::Corrupt`] when
/// the stored text does not decode as `T`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)?;
    tracing::trace!(key, bytes = json.len(), "persisted value");
    Ok(())
}

/// Delete `key`, logging whether anything was there.
pub fn remove(store: &dyn KeyValueStore, key: &str) -> Result<bool> {
    let removed = store.remove(key)?;
    tracing::trace!(key, removed, "removed value");
    Ok(removed)
}

/// Process-local storage that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
