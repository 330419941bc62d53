/*!
 * Key-value persistence for local client state.
 *
 * Everything the client keeps between runs (summary history, display
 * theme) is a string value stored under a fixed key and read or written
 * wholesale. `KeyValueStore` is the capability the rest of the crate is
 * given; the backends are:
 * - `SqliteStore`: a `kv` table in a local SQLite file
 * - `MemoryStore`: a process-local map, used in tests and ephemeral runs
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod connection;
pub mod kv_store;
pub mod memory;
pub mod schema;

pub use connection::DatabaseConnection;
pub use kv_store::SqliteStore;
pub use memory::MemoryStore;

/// Wholesale string persistence by key
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`; missing keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
