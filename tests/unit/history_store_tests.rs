/*!
 * Tests for the entry store
 */

use std::sync::Arc;

use vtai::database::MemoryStore;
use vtai::history::{EntryStore, HISTORY_CAPACITY, HISTORY_KEY};

use crate::common::{init_test_logging, sample_entry};

fn store_over(kv: &MemoryStore) -> EntryStore {
    init_test_logging();
    EntryStore::new(Arc::new(kv.clone()))
}

#[tokio::test]
async fn test_list_withNoPersistedState_shouldReturnEmpty() {
    let store = store_over(&MemoryStore::new());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_with21Entries_shouldKeepNewest20NewestFirst() {
    let kv = MemoryStore::new();
    let store = store_over(&kv);

    let mut ids = Vec::new();
    for i in 0..21 {
        let entry = sample_entry(&format!("https://youtu.be/v{}", i), &format!("summary {}", i));
        ids.push(entry.id.clone());
        store.append(entry).await.unwrap();
    }

    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), HISTORY_CAPACITY);

    let expected: Vec<String> = ids.iter().rev().take(20).cloned().collect();
    let actual: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
    assert_eq!(actual, expected);
    assert!(!actual.contains(&ids[0]));
}

#[tokio::test]
async fn test_clear_shouldEmptyListAndPersistedState() {
    let kv = MemoryStore::new();
    let store = store_over(&kv);
    store.append(sample_entry("https://youtu.be/a", "a")).await.unwrap();
    store.append(sample_entry("https://youtu.be/b", "b")).await.unwrap();

    store.clear().await.unwrap();

    assert!(store.list().await.unwrap().is_empty());
    assert!(kv.raw(HISTORY_KEY).is_none());
    assert!(store_over(&kv).list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_withCorruptStorage_shouldReturnEmpty() {
    let kv = MemoryStore::with_value(HISTORY_KEY, "{not json at all");
    let store = store_over(&kv);

    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_withCorruptStorage_shouldReplaceItWithValidList() {
    let kv = MemoryStore::with_value(HISTORY_KEY, "[1, 2, 3]");
    let store = store_over(&kv);

    store.append(sample_entry("https://youtu.be/a", "a")).await.unwrap();

    let entries = store_over(&kv).list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].summary_text, "a");
}

#[tokio::test]
async fn test_update_shouldChangeOnlySummaryOfTargetEntry() {
    let kv = MemoryStore::new();
    let store = store_over(&kv);
    let a = sample_entry("https://youtu.be/a", "alpha");
    let b = sample_entry("https://youtu.be/b", "beta");
    store.append(a.clone()).await.unwrap();
    store.append(b.clone()).await.unwrap();

    let updated = store.update(&a.id, |s| s.to_uppercase()).await.unwrap();

    assert_eq!(updated.summary_text, "ALPHA");
    assert_eq!(updated.transcript_text, a.transcript_text);
    assert_eq!(updated.created_at, a.created_at);
    let entries = store.list().await.unwrap();
    assert_eq!(entries[0], b);
    assert_eq!(entries[1].summary_text, "ALPHA");
}

#[tokio::test]
async fn test_concurrentAppendAndUpdate_shouldBothBeVisible() {
    let kv = MemoryStore::new();
    let store = Arc::new(store_over(&kv));
    let old = sample_entry("https://youtu.be/old", "old");
    store.append(old.clone()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .append(sample_entry(&format!("https://youtu.be/n{}", i), &format!("new {}", i)))
                .await
        }));
    }
    let updater = {
        let store = store.clone();
        let id = old.id.clone();
        tokio::spawn(async move { store.update(&id, |_| "translated".to_string()).await })
    };

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    updater.await.unwrap().unwrap();

    let entries = store_over(&kv).list().await.unwrap();
    assert_eq!(entries.len(), 11);
    let old_entry = entries.iter().find(|e| e.id == old.id).unwrap();
    assert_eq!(old_entry.summary_text, "translated");
}

#[test]
fn test_entryStore_fromSyncCaller_shouldRoundTripThroughBlockOn() {
    let kv = MemoryStore::new();
    let store = store_over(&kv);
    let entry = sample_entry("https://youtu.be/sync", "sync summary");

    tokio_test::block_on(store.append(entry.clone())).unwrap();

    let fetched = tokio_test::block_on(store.get(&entry.id)).unwrap();
    assert_eq!(fetched, entry);
    assert!(kv.raw(HISTORY_KEY).unwrap().contains("sync summary"));
}
