use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

use super::connection::DatabaseConnection;
use super::KeyValueStore;

/// SQLite-backed key-value store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Create a store over an existing connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path)?))
    }

    /// Open the database at the platform default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_default()?))
    }

    /// Create a store with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        self.db.path()
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();

        self.db
            .execute_async(move |conn| {
                let value = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", [&key], |row| {
                        row.get::<_, String>(0)
                    })
                    .optional()?;
                Ok(value)
            })
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                    "#,
                    params![key, value],
                )?;
                debug!("Stored {} bytes under '{}'", value.len(), key);
                Ok(())
            })
            .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute("DELETE FROM kv WHERE key = ?1", [&key])?;
                Ok(())
            })
            .await
    }
}
