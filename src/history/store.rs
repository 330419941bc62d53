/*!
 * Entry store: the persisted history and its access layer.
 *
 * Every mutation holds the store's write lock across the whole
 * read-modify-write cycle and reads persisted state inside it, so
 * overlapping callers never write back a list captured before another
 * caller's change.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::database::KeyValueStore;
use crate::errors::SessionError;

use super::models::{Entry, EntryList};

/// Storage key holding the serialized history
pub const HISTORY_KEY: &str = "history";

/// Bounded newest-first history persisted through a `KeyValueStore`
#[derive(Debug)]
pub struct EntryStore {
    kv: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl EntryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All entries, newest first
    ///
    /// Missing or unparseable persisted content yields an empty list.
    pub async fn list(&self) -> Result<Vec<Entry>, SessionError> {
        Ok(self.load().await?.into_vec())
    }

    /// Look up one entry by id in freshly read state
    pub async fn get(&self, id: &str) -> Result<Entry, SessionError> {
        self.load()
            .await?
            .find(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Prepend `entry`, trimming the oldest entries beyond capacity
    pub async fn append(&self, entry: Entry) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;

        let mut list = self.load().await?;
        let id = entry.id.clone();
        list.prepend(entry);
        self.persist(&list).await?;

        debug!("Appended history entry {} ({} stored)", id, list.len());
        Ok(())
    }

    /// Replace the summary text of entry `id` with `mutator(current)`
    ///
    /// Returns the updated entry, or `NotFound` without writing anything
    /// when no entry carries `id`.
    pub async fn update<F>(&self, id: &str, mutator: F) -> Result<Entry, SessionError>
    where
        F: FnOnce(&str) -> String + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut list = self.load().await?;
        let entry = list
            .find_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        entry.summary_text = mutator(&entry.summary_text);
        let updated = entry.clone();
        self.persist(&list).await?;

        debug!("Updated summary of history entry {}", id);
        Ok(updated)
    }

    /// Delete all history
    pub async fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;

        self.kv
            .remove(HISTORY_KEY)
            .await
            .map_err(|e| SessionError::Storage(format!("{:#}", e)))?;

        info!("History cleared");
        Ok(())
    }

    // =========================================================================
    // Persistence helpers
    // =========================================================================

    async fn load(&self) -> Result<EntryList, SessionError> {
        let raw = self
            .kv
            .get(HISTORY_KEY)
            .await
            .map_err(|e| SessionError::Storage(format!("{:#}", e)))?;

        match raw {
            None => Ok(EntryList::new()),
            Some(raw) => match EntryList::parse(&raw) {
                Ok(list) => Ok(list),
                Err(e) => {
                    warn!("Ignoring unreadable history: {}", e);
                    Ok(EntryList::new())
                }
            },
        }
    }

    async fn persist(&self, list: &EntryList) -> Result<(), SessionError> {
        let raw = list.to_json()?;
        self.kv
            .set(HISTORY_KEY, &raw)
            .await
            .map_err(|e| SessionError::Storage(format!("{:#}", e)))
    }
}
