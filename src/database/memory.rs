use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::KeyValueStore;

/// In-process key-value store
///
/// Clones share the same storage, so a clone handed to a second
/// `EntryStore` behaves like a reload of the same persisted state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any higher-level format
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.write().insert(key.to_string(), value.to_string());
        store
    }

    /// Raw value currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
