/*!
 * Translation overlay.
 *
 * Applies the external translator either to the controller's active
 * result (in memory only) or to a stored history entry (persisted
 * through the entry store). A failed translation never mutates
 * anything.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::errors::{ProviderError, SessionError};
use crate::history::{Entry, EntryStore};
use crate::language_utils;
use crate::providers::Translator;
use crate::session::RequestController;

/// Translates summaries in place
#[derive(Debug)]
pub struct TranslationOverlay {
    translator: Arc<dyn Translator>,
    store: Arc<EntryStore>,
    controller: Arc<RequestController>,
    /// Upper bound on one translation call
    request_timeout: Duration,
}

impl TranslationOverlay {
    pub fn new(
        translator: Arc<dyn Translator>,
        store: Arc<EntryStore>,
        controller: Arc<RequestController>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            translator,
            store,
            controller,
            request_timeout,
        }
    }

    /// Translate `text` into `target_language`
    ///
    /// The code is validated before any network call; empty text is
    /// returned unchanged.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, SessionError> {
        let target = language_utils::validate_language_code(target_language)
            .map_err(|e| SessionError::InvalidInput(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let outcome = match timeout(self.request_timeout, self.translator.translate(text, &target)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::Timeout(self.request_timeout.as_millis() as u64)),
        };

        outcome.map_err(|e| {
            warn!("Translation to {} failed: {}", target, e);
            SessionError::TranslationFailed(e.to_string())
        })
    }

    /// Translate the active result's summary in memory
    ///
    /// Returns the new text, or `None` when there is no active result or
    /// a newer request replaced it while the translation was in flight.
    /// The history entry created for the active result is left as it was.
    pub async fn translate_active(&self, target_language: &str) -> Result<Option<String>, SessionError> {
        let Some((generation, summary)) = self.controller.active_summary() else {
            debug!("No active result to translate");
            return Ok(None);
        };

        let translated = self.translate(&summary, target_language).await?;

        if self.controller.replace_active_summary(generation, translated.clone()) {
            info!("Active summary translated to {}", target_language);
            Ok(Some(translated))
        } else {
            debug!("Active result changed during translation; discarding");
            Ok(None)
        }
    }

    /// Translate the summary of history entry `id` and persist it
    ///
    /// Returns the updated entry, or `None` when the entry does not exist
    /// (before the call or by the time it completes).
    pub async fn translate_entry(&self, id: &str, target_language: &str) -> Result<Option<Entry>, SessionError> {
        let entry = match self.store.get(id).await {
            Ok(entry) => entry,
            Err(SessionError::NotFound(_)) => {
                debug!("History entry {} not found; nothing to translate", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let translated = self.translate(&entry.summary_text, target_language).await?;

        match self.store.update(id, move |_| translated).await {
            Ok(updated) => {
                info!("History entry {} translated to {}", id, target_language);
                Ok(Some(updated))
            }
            Err(SessionError::NotFound(_)) => {
                debug!("History entry {} removed during translation", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
