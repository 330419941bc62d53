/*!
 * Summarization session: request types and the request controller.
 *
 * This module provides:
 * - `SummaryRequest` / `SummaryResult` and their supporting types
 * - `RequestController`, which owns the active result and discards stale responses
 */

pub mod controller;
pub mod models;

// Re-export main types
pub use controller::{ControllerSnapshot, RequestController, RequestPhase};
pub use models::{
    DownloadKind, DownloadLink, SummaryMode, SummaryRequest, SummaryResult, SummarySize,
    SummaryTarget, DEFAULT_UPLOAD_TITLE,
};
