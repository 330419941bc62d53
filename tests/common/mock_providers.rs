/*!
 * Gated collaborators for deterministic concurrency tests.
 *
 * Calls whose key has a gate registered park until the test releases
 * them through the returned sender, so the test decides the completion
 * order. Every call announces its key on the `started` channel once it
 * is in flight.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

use vtai::errors::ProviderError;
use vtai::providers::{SummaryBackend, Translator};
use vtai::session::{SummaryRequest, SummaryResult};

use super::sample_result;

type Gate<T> = oneshot::Receiver<Result<T, ProviderError>>;

/// Releases one parked call with the given outcome
pub struct Release<T>(oneshot::Sender<Result<T, ProviderError>>);

impl<T> Release<T> {
    pub fn succeed(self, value: T) {
        let _ = self.0.send(Ok(value));
    }

    pub fn fail(self, error: ProviderError) {
        let _ = self.0.send(Err(error));
    }
}

#[derive(Debug)]
struct Gates<T> {
    gates: Mutex<HashMap<String, Gate<T>>>,
    started_tx: mpsc::UnboundedSender<String>,
    started_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
}

impl<T> Gates<T> {
    fn new() -> Self {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        Self {
            gates: Mutex::new(HashMap::new()),
            started_tx,
            started_rx: tokio::sync::Mutex::new(started_rx),
        }
    }

    fn gate(&self, key: &str) -> Release<T> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(key.to_string(), rx);
        Release(tx)
    }

    async fn pass(&self, key: &str) -> Option<Result<T, ProviderError>> {
        let gate = self.gates.lock().remove(key);
        let _ = self.started_tx.send(key.to_string());
        match gate {
            Some(rx) => Some(rx.await.unwrap_or_else(|_| {
                Err(ProviderError::RequestFailed("gate dropped".to_string()))
            })),
            None => None,
        }
    }

    async fn next_started(&self) -> String {
        self.started_rx
            .lock()
            .await
            .recv()
            .await
            .expect("started channel closed")
    }
}

/// Summarization backend keyed by request title
#[derive(Debug)]
pub struct GatedBackend {
    gates: Gates<SummaryResult>,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self { gates: Gates::new() }
    }

    /// Park the next call for `title` until released
    pub fn gate(&self, title: &str) -> Release<SummaryResult> {
        self.gates.gate(title)
    }

    /// Wait until a call is in flight and return its title
    pub async fn next_started(&self) -> String {
        self.gates.next_started().await
    }
}

#[async_trait]
impl SummaryBackend for GatedBackend {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ProviderError> {
        let title = request.title();
        match self.gates.pass(&title).await {
            Some(outcome) => outcome,
            None => Ok(sample_result(&format!("summary of {}", title))),
        }
    }
}

/// Translator keyed by source text
#[derive(Debug)]
pub struct GatedTranslator {
    gates: Gates<String>,
}

impl GatedTranslator {
    pub fn new() -> Self {
        Self { gates: Gates::new() }
    }

    /// Park the next translation of `text` until released
    pub fn gate(&self, text: &str) -> Release<String> {
        self.gates.gate(text)
    }

    pub async fn next_started(&self) -> String {
        self.gates.next_started().await
    }
}

#[async_trait]
impl Translator for GatedTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        match self.gates.pass(text).await {
            Some(outcome) => outcome,
            None => Ok(format!("[{}] {}", target_language, text)),
        }
    }
}
