/*!
 * Persisted history records.
 *
 * The JSON shape is stable across releases: `id`, `when`, `mode`,
 * `title`, `size`, `detected_language`, `download_txt_url`,
 * `download_pdf_url`, `transcript`, `summary`. Unknown or absent optional
 * fields default rather than fail.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SessionError;
use crate::session::{
    DownloadKind, DownloadLink, SummaryMode, SummaryRequest, SummaryResult, SummarySize,
};

/// Maximum number of entries kept in history
pub const HISTORY_CAPACITY: usize = 20;

/// One persisted summarization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,

    #[serde(rename = "when")]
    pub created_at: DateTime<Utc>,

    pub mode: SummaryMode,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub size: SummarySize,

    #[serde(default)]
    pub detected_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_txt_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_pdf_url: Option<String>,

    #[serde(rename = "transcript", default)]
    pub transcript_text: String,

    /// The only field that changes after creation
    #[serde(rename = "summary", default)]
    pub summary_text: String,
}

impl Entry {
    /// Build a new entry for a successful request
    pub fn from_result(request: &SummaryRequest, result: &SummaryResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            mode: request.mode(),
            title: request.title(),
            size: request.size,
            detected_language: result.detected_language.clone(),
            download_txt_url: result.link(DownloadKind::Text).map(|l| l.path.clone()),
            download_pdf_url: result.link(DownloadKind::Pdf).map(|l| l.path.clone()),
            transcript_text: result.transcript_text.clone(),
            summary_text: result.summary_text.clone(),
        }
    }

    /// Typed download links, text first
    pub fn download_links(&self) -> Vec<DownloadLink> {
        let mut links = Vec::new();
        if let Some(path) = &self.download_txt_url {
            links.push(DownloadLink::new(DownloadKind::Text, path.clone()));
        }
        if let Some(path) = &self.download_pdf_url {
            links.push(DownloadLink::new(DownloadKind::Pdf, path.clone()));
        }
        links
    }

    pub fn link(&self, kind: DownloadKind) -> Option<DownloadLink> {
        let path = match kind {
            DownloadKind::Text => self.download_txt_url.as_ref(),
            DownloadKind::Pdf => self.download_pdf_url.as_ref(),
        };
        path.map(|p| DownloadLink::new(kind, p.clone()))
    }
}

/// Newest-first list of entries, bounded by `HISTORY_CAPACITY`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted representation
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        serde_json::from_str(raw).map_err(|e| SessionError::CorruptPersistedState(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(|e| SessionError::Storage(e.to_string()))
    }

    /// Insert `entry` at the head, dropping any entry with the same id and
    /// trimming the oldest beyond capacity
    pub fn prepend(&mut self, entry: Entry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Entry> {
        self.entries
    }
}
