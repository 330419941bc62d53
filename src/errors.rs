/*!
 * Error types for the vtai client.
 *
 * `ProviderError` describes failures of the external collaborators
 * (summarization backend, translation service). `SessionError` is the
 * taxonomy callers of the session layer see; every variant carries a
 * short user-facing message separate from its diagnostic text.
 */

use thiserror::Error;

/// Message shown whenever a summarization request fails.
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong. Try again.";

/// Message shown whenever a translation fails.
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed. Please try again.";

/// Errors that can occur when talking to an external service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The call did not complete within its time budget
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors surfaced by the request controller, entry store and translation overlay
#[derive(Error, Debug)]
pub enum SessionError {
    /// The request was rejected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The summarization backend failed or returned an unusable response
    #[error("Summarization request failed: {0}")]
    RequestFailed(String),

    /// The translation service failed; nothing was mutated
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// No history entry carries the given id
    #[error("History entry not found: {0}")]
    NotFound(String),

    /// The persisted history could not be parsed
    #[error("Persisted history is corrupt: {0}")]
    CorruptPersistedState(String),

    /// A newer request started before this one completed; the response was dropped
    #[error("Request generation {generation} was superseded by a newer request")]
    Superseded {
        /// Generation token of the discarded request
        generation: u64,
    },

    /// The key-value backend failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SessionError {
    /// Short static text suitable for showing to a user
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Please provide a video link or select a file.",
            Self::RequestFailed(_) => REQUEST_FAILED_MESSAGE,
            Self::TranslationFailed(_) => TRANSLATION_FAILED_MESSAGE,
            Self::NotFound(_) => "That history item no longer exists.",
            Self::CorruptPersistedState(_) => "History could not be read and was reset.",
            Self::Superseded { .. } => "A newer request replaced this one.",
            Self::Storage(_) => "Could not access local history.",
        }
    }

    /// Whether the error represents a discarded stale response rather than a failure
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

impl From<ProviderError> for SessionError {
    fn from(error: ProviderError) -> Self {
        Self::RequestFailed(error.to_string())
    }
}
