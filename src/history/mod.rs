/*!
 * Local history of summarization results.
 *
 * This module provides:
 * - `Entry`: one persisted result
 * - `EntryList`: the bounded newest-first collection
 * - `EntryStore`: serialized access to the persisted list
 */

pub mod models;
pub mod store;

pub use models::{Entry, EntryList, HISTORY_CAPACITY};
pub use store::{EntryStore, HISTORY_KEY};
