/*!
 * Mock collaborators for testing and offline runs.
 *
 * - `MockSummaryBackend::working()` - Always succeeds with a summary derived from the request
 * - `MockSummaryBackend::failing()` - Always fails with an API error
 * - `MockTranslator::working()` - Tags text with the target language
 * - `MockTranslator::failing()` - Always fails
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use crate::errors::ProviderError;
use crate::providers::{SummaryBackend, Translator};
use crate::session::{DownloadKind, DownloadLink, SummaryRequest, SummaryResult};

/// Behavior mode for the mocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock summarization backend
#[derive(Debug, Clone)]
pub struct MockSummaryBackend {
    behavior: MockBehavior,
    /// Number of calls made so far, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockSummaryBackend {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn result_for(request: &SummaryRequest, n: usize) -> SummaryResult {
        let title = request.title();
        SummaryResult {
            summary_text: format!("[SUMMARY {}] {}", request.size, title),
            transcript_text: format!("[TRANSCRIPT] {}", title),
            detected_language: Some(request.language.clone().unwrap_or_else(|| "en".to_string())),
            download_links: vec![
                DownloadLink::new(DownloadKind::Text, format!("/download/txt/mock-{}", n)),
                DownloadLink::new(DownloadKind::Pdf, format!("/download/pdf/mock-{}", n)),
            ],
        }
    }
}

#[async_trait]
impl SummaryBackend for MockSummaryBackend {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ProviderError> {
        let n = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::result_for(request, n)),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),
            MockBehavior::Slow { delay_ms } => {
                sleep(Duration::from_millis(delay_ms)).await;
                Ok(Self::result_for(request, n))
            }
        }
    }
}

/// Mock translation service
#[derive(Debug, Clone)]
pub struct MockTranslator {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Output produced by the working behavior
    pub fn translated(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::translated(text, target_language)),
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated translation failure".to_string(),
            )),
            MockBehavior::Slow { delay_ms } => {
                sleep(Duration::from_millis(delay_ms)).await;
                Ok(Self::translated(text, target_language))
            }
        }
    }
}
