/*!
 * Tests for translating active and stored summaries
 */

use std::sync::Arc;
use std::time::Duration;

use vtai::database::MemoryStore;
use vtai::errors::{ProviderError, SessionError};
use vtai::history::{EntryStore, HISTORY_KEY};
use vtai::providers::mock::{MockSummaryBackend, MockTranslator};
use vtai::session::RequestController;
use vtai::translation::TranslationOverlay;

use crate::common::{init_test_logging, sample_entry, sample_result, url_request, Harness};

#[tokio::test]
async fn test_translateEntry_withOverlappingCallsResolvedOutOfOrder_shouldKeepBothUpdates() {
    let h = Harness::new();
    let a = sample_entry("https://youtu.be/a", "alpha text");
    let b = sample_entry("https://youtu.be/b", "beta text");
    let c = sample_entry("https://youtu.be/c", "gamma text");
    for entry in [a.clone(), b.clone(), c.clone()] {
        h.store.append(entry).await.unwrap();
    }

    let release_a = h.translator.gate("alpha text");
    let release_b = h.translator.gate("beta text");

    let task_a = {
        let overlay = h.overlay.clone();
        let id = a.id.clone();
        tokio::spawn(async move { overlay.translate_entry(&id, "fr").await })
    };
    let task_b = {
        let overlay = h.overlay.clone();
        let id = b.id.clone();
        tokio::spawn(async move { overlay.translate_entry(&id, "de").await })
    };
    h.translator.next_started().await;
    h.translator.next_started().await;

    release_b.succeed("beta auf Deutsch".to_string());
    let updated_b = task_b.await.unwrap().unwrap().unwrap();
    assert_eq!(updated_b.summary_text, "beta auf Deutsch");

    release_a.succeed("alpha en français".to_string());
    let updated_a = task_a.await.unwrap().unwrap().unwrap();
    assert_eq!(updated_a.summary_text, "alpha en français");

    let entries = h.reloaded_store().list().await.unwrap();
    assert_eq!(entries.len(), 3);
    let find = |id: &str| entries.iter().find(|e| e.id == id).unwrap().clone();
    assert_eq!(find(&a.id).summary_text, "alpha en français");
    assert_eq!(find(&b.id).summary_text, "beta auf Deutsch");
    assert_eq!(find(&c.id), c);
}

#[tokio::test]
async fn test_translateEntry_withServiceFailure_shouldLeaveStorageByteIdentical() {
    let h = Harness::new();
    let entry = sample_entry("https://youtu.be/a", "original");
    h.store.append(entry.clone()).await.unwrap();
    let before = h.kv.raw(HISTORY_KEY);

    let release = h.translator.gate("original");
    release.fail(ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    });
    let result = h.overlay.translate_entry(&entry.id, "fr").await;

    assert!(matches!(result, Err(SessionError::TranslationFailed(_))));
    assert_eq!(h.kv.raw(HISTORY_KEY), before);
}

#[tokio::test]
async fn test_translateActive_withServiceFailure_shouldLeaveActiveTextUnchanged() {
    let h = Harness::new();
    h.backend.gate("https://youtu.be/a").succeed(sample_result("active text"));
    h.controller.submit(url_request("https://youtu.be/a")).await.unwrap();

    h.translator
        .gate("active text")
        .fail(ProviderError::ConnectionError("offline".to_string()));
    let result = h.overlay.translate_active("ja").await;

    assert!(matches!(result, Err(SessionError::TranslationFailed(_))));
    assert_eq!(
        h.controller.active_result().map(|r| r.summary_text),
        Some("active text".to_string())
    );
}

#[tokio::test]
async fn test_translateActive_shouldNotPersistToHistory() {
    let h = Harness::new();
    h.backend.gate("https://youtu.be/a").succeed(sample_result("hello"));
    h.controller.submit(url_request("https://youtu.be/a")).await.unwrap();

    let translated = h.overlay.translate_active("hi").await.unwrap();

    assert_eq!(translated.as_deref(), Some("[hi] hello"));
    assert_eq!(
        h.controller.active_result().map(|r| r.summary_text),
        Some("[hi] hello".to_string())
    );
    assert_eq!(h.store.list().await.unwrap()[0].summary_text, "hello");
}

#[tokio::test]
async fn test_translateActive_whenNewRequestStartsMidway_shouldDiscardTranslation() {
    let h = Harness::new();
    h.backend.gate("https://youtu.be/a").succeed(sample_result("first"));
    h.controller.submit(url_request("https://youtu.be/a")).await.unwrap();

    let release_translation = h.translator.gate("first");
    let translation = {
        let overlay = h.overlay.clone();
        tokio::spawn(async move { overlay.translate_active("fr").await })
    };
    h.translator.next_started().await;

    h.backend.gate("https://youtu.be/b").succeed(sample_result("second"));
    h.controller.submit(url_request("https://youtu.be/b")).await.unwrap();

    release_translation.succeed("premier".to_string());
    assert_eq!(translation.await.unwrap().unwrap(), None);
    assert_eq!(
        h.controller.active_result().map(|r| r.summary_text),
        Some("second".to_string())
    );
}

#[tokio::test]
async fn test_translateEntry_whenHistoryClearedMidway_shouldReturnNoneAndWriteNothing() {
    let h = Harness::new();
    let entry = sample_entry("https://youtu.be/a", "soon gone");
    h.store.append(entry.clone()).await.unwrap();

    let release = h.translator.gate("soon gone");
    let task = {
        let overlay = h.overlay.clone();
        let id = entry.id.clone();
        tokio::spawn(async move { overlay.translate_entry(&id, "es").await })
    };
    h.translator.next_started().await;

    h.store.clear().await.unwrap();
    release.succeed("pronto desaparecido".to_string());

    assert!(task.await.unwrap().unwrap().is_none());
    assert!(h.kv.raw(HISTORY_KEY).is_none());
}

#[tokio::test]
async fn test_translate_withSlowService_shouldTimeOutWithoutTouchingState() {
    init_test_logging();
    let kv = MemoryStore::new();
    let store = Arc::new(EntryStore::new(Arc::new(kv.clone())));
    let controller = Arc::new(RequestController::new(
        Arc::new(MockSummaryBackend::working()),
        store.clone(),
        Duration::from_secs(5),
    ));
    let translator = Arc::new(MockTranslator::slow(500));
    let overlay = TranslationOverlay::new(translator.clone(), store.clone(), controller.clone(), Duration::from_millis(20));

    store.append(sample_entry("https://youtu.be/old", "stored text")).await.unwrap();
    let active = controller.submit(url_request("https://youtu.be/new")).await.unwrap();
    let stored_id = store.list().await.unwrap()[1].id.clone();
    let before = kv.raw(HISTORY_KEY);

    let entry_result = overlay.translate_entry(&stored_id, "fr").await;
    assert!(matches!(entry_result, Err(SessionError::TranslationFailed(_))), "{:?}", entry_result);

    let active_result = overlay.translate_active("de").await;
    assert!(matches!(active_result, Err(SessionError::TranslationFailed(_))), "{:?}", active_result);

    assert_eq!(translator.request_count(), 2);
    assert_eq!(kv.raw(HISTORY_KEY), before);
    assert_eq!(
        controller.active_result().map(|r| r.summary_text),
        Some(active.summary_text)
    );
}
