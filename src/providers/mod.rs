/*!
 * Clients for the external collaborators.
 *
 * - `summarizer`: the summarization backend (by reference and by upload)
 * - `google_translate`: the public translation endpoint
 * - `mock`: deterministic stand-ins for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::session::{SummaryRequest, SummaryResult};

/// Produces a summary and transcript for a video
#[async_trait]
pub trait SummaryBackend: Send + Sync + Debug {
    /// Run one summarization call
    ///
    /// # Arguments
    /// * `request` - A validated request
    ///
    /// # Returns
    /// * `Result<SummaryResult, ProviderError>` - The parsed result or the raw failure
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ProviderError>;
}

/// Translates free text into a target language
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` into `target_language` (ISO 639-1), detecting the source
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;
}

pub mod google_translate;
pub mod mock;
pub mod summarizer;

pub use google_translate::GoogleTranslator;
pub use summarizer::HttpSummaryBackend;
