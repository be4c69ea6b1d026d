//! Persistent key-value storage abstract Trait

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Per-origin string store
///
/// Holds small UI preferences (last selected site, switch group tab).
/// Synchronous on purpose: reads happen while views are being built.
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Delete a value
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// In-memory store
///
/// Used when no persistent location is available, and in tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("storage lock poisoned".to_string())
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.values.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.values
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.values.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("swlistgrp").unwrap(), None);
        store.set("swlistgrp", "core").unwrap();
        assert_eq!(store.get("swlistgrp").unwrap().as_deref(), Some("core"));
        store.remove("swlistgrp").unwrap();
        assert_eq!(store.get("swlistgrp").unwrap(), None);
    }
}
