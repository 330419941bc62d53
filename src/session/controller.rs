/*!
 * Request controller: the lifecycle of summarization requests.
 *
 * `Idle → Pending → (Succeeded | Failed) → Idle`. Every `submit` takes
 * a fresh generation number; a response whose generation is no longer
 * current is dropped without touching state or history.
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::errors::{ProviderError, SessionError, REQUEST_FAILED_MESSAGE};
use crate::history::{Entry, EntryStore};
use crate::providers::SummaryBackend;

use super::models::{SummaryRequest, SummaryResult};

/// Lifecycle phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub phase: RequestPhase,
    /// Generation of the most recent submission
    pub generation: u64,
    pub active_result: Option<SummaryResult>,
    /// Short user-facing message after a failure
    pub error_message: Option<&'static str>,
}

#[derive(Debug)]
struct ControllerState {
    phase: RequestPhase,
    generation: u64,
    active: Option<SummaryResult>,
    error_message: Option<&'static str>,
}

/// Drives one summarization request at a time
#[derive(Debug)]
pub struct RequestController {
    backend: Arc<dyn SummaryBackend>,
    store: Arc<EntryStore>,
    /// Upper bound on one backend call
    request_timeout: Duration,
    state: Mutex<ControllerState>,
}

impl RequestController {
    pub fn new(backend: Arc<dyn SummaryBackend>, store: Arc<EntryStore>, request_timeout: Duration) -> Self {
        Self {
            backend,
            store,
            request_timeout,
            state: Mutex::new(ControllerState {
                phase: RequestPhase::Idle,
                generation: 0,
                active: None,
                error_message: None,
            }),
        }
    }

    /// Submit a request and wait for its outcome
    ///
    /// A newer `submit` started before this one completes supersedes it:
    /// this call then returns `Superseded` and leaves everything as the
    /// newer request set it.
    pub async fn submit(&self, request: SummaryRequest) -> Result<SummaryResult, SessionError> {
        request.validate()?;

        let generation = self.begin();
        info!(
            "Submitting {} request #{} for '{}' ({})",
            request.mode().as_str(),
            generation,
            request.title(),
            request.size
        );

        let outcome = match timeout(self.request_timeout, self.backend.summarize(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::Timeout(self.request_timeout.as_millis() as u64)),
        };

        let is_current = {
            let mut state = self.state.lock();
            if state.generation != generation {
                false
            } else {
                match &outcome {
                    Ok(result) => {
                        state.phase = RequestPhase::Succeeded;
                        state.active = Some(result.clone());
                        state.error_message = None;
                    }
                    Err(_) => {
                        state.phase = RequestPhase::Failed;
                        state.active = None;
                        state.error_message = Some(REQUEST_FAILED_MESSAGE);
                    }
                }
                true
            }
        };

        if !is_current {
            debug!("Discarding response of superseded request #{}", generation);
            return Err(SessionError::Superseded { generation });
        }

        match outcome {
            Ok(result) => {
                // Active result is committed before the entry becomes visible
                let entry = Entry::from_result(&request, &result);
                if let Err(e) = self.store.append(entry).await {
                    error!("Failed to record request #{} in history: {}", generation, e);
                }
                info!("Request #{} succeeded", generation);
                Ok(result)
            }
            Err(e) => {
                error!("Request #{} failed: {}", generation, e);
                Err(e.into())
            }
        }
    }

    /// Current phase, generation, active result and error message
    pub fn snapshot(&self) -> ControllerSnapshot {
        let state = self.state.lock();
        ControllerSnapshot {
            phase: state.phase,
            generation: state.generation,
            active_result: state.active.clone(),
            error_message: state.error_message,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.state.lock().phase
    }

    pub fn active_result(&self) -> Option<SummaryResult> {
        self.state.lock().active.clone()
    }

    /// Return a finished controller to `Idle`, clearing the active result
    ///
    /// Has no effect while a request is pending.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        if state.phase == RequestPhase::Pending {
            warn!("Ignoring reset while request #{} is pending", state.generation);
            return;
        }
        state.phase = RequestPhase::Idle;
        state.active = None;
        state.error_message = None;
    }

    /// Generation and summary text of the active result, if any
    pub fn active_summary(&self) -> Option<(u64, String)> {
        let state = self.state.lock();
        state
            .active
            .as_ref()
            .map(|result| (state.generation, result.summary_text.clone()))
    }

    /// Overwrite the active summary text if `generation` is still current
    ///
    /// Returns whether the text was applied.
    pub fn replace_active_summary(&self, generation: u64, text: String) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            return false;
        }
        match state.active.as_mut() {
            Some(result) => {
                result.summary_text = text;
                true
            }
            None => false,
        }
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        if state.phase == RequestPhase::Pending {
            debug!("Request #{} superseded", state.generation);
        }
        state.generation += 1;
        state.phase = RequestPhase::Pending;
        state.active = None;
        state.error_message = None;
        state.generation
    }
}
