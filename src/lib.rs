/*!
 * # vtai - video summary client
 *
 * Client-side session and cache orchestration for a video summarization
 * service.
 *
 * ## Features
 *
 * - Summarize a video by link or by uploaded file
 * - Discard stale responses when a newer request supersedes an older one
 * - Keep the 20 most recent results in a persisted local history
 * - Translate the active summary or any stored summary without losing
 *   concurrent history updates
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `session`: Request types and the request controller
 * - `history`: Persisted history entries and the entry store
 * - `translation`: The translation overlay
 * - `providers`: Clients for the summarization backend and the translation service
 * - `database`: Key-value persistence (SQLite and in-memory)
 * - `theme`: Persisted display theme
 * - `app_controller`: Wiring of all of the above from a `Config`
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod history;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod theme;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Application;
pub use errors::{ProviderError, SessionError};
pub use history::{Entry, EntryStore};
pub use session::{RequestController, SummaryRequest, SummaryResult};
pub use translation::TranslationOverlay;
