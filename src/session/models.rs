/*!
 * Request and result types for one summarization attempt.
 *
 * A `SummaryRequest` is immutable once submitted; a `SummaryResult` is
 * owned by the request controller until it is mirrored into a history
 * entry.
 */

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::SessionError;

/// Title recorded for uploads whose file name is unknown
pub const DEFAULT_UPLOAD_TITLE: &str = "Uploaded file";

/// How the video reaches the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryMode {
    /// A remote link the backend downloads itself
    #[serde(rename = "url")]
    ByReference,
    /// A file sent in the request body
    #[serde(rename = "upload")]
    ByUpload,
}

impl SummaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByReference => "url",
            Self::ByUpload => "upload",
        }
    }
}

/// Requested summary length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySize {
    #[default]
    Small,
    Medium,
    Large,
}

impl SummarySize {
    /// Wire value sent as `summary_size`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Human-readable word range
    pub fn description(&self) -> &'static str {
        match self {
            Self::Small => "Small (100–200 words)",
            Self::Medium => "Medium (201–300 words)",
            Self::Large => "Large (301–400 words)",
        }
    }
}

impl std::fmt::Display for SummarySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SummarySize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(anyhow::anyhow!("Invalid summary size: {}", s)),
        }
    }
}

/// What is being summarized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryTarget {
    /// Remote video link
    Url(String),
    /// Uploaded media bytes with the original file name
    Upload { file_name: String, payload: Bytes },
}

/// Input to one summarization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub target: SummaryTarget,
    pub size: SummarySize,
    /// Source-language hint
    pub language: Option<String>,
    pub translate_to_english: bool,
}

impl SummaryRequest {
    /// Request a summary of a remote video
    pub fn by_reference(url: impl Into<String>, size: SummarySize) -> Self {
        Self {
            target: SummaryTarget::Url(url.into()),
            size,
            language: None,
            translate_to_english: false,
        }
    }

    /// Request a summary of an uploaded file
    pub fn by_upload(file_name: impl Into<String>, payload: impl Into<Bytes>, size: SummarySize) -> Self {
        Self {
            target: SummaryTarget::Upload {
                file_name: file_name.into(),
                payload: payload.into(),
            },
            size,
            language: None,
            translate_to_english: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_translate_to_english(mut self, translate: bool) -> Self {
        self.translate_to_english = translate;
        self
    }

    pub fn mode(&self) -> SummaryMode {
        match self.target {
            SummaryTarget::Url(_) => SummaryMode::ByReference,
            SummaryTarget::Upload { .. } => SummaryMode::ByUpload,
        }
    }

    /// Display label recorded in history
    pub fn title(&self) -> String {
        match &self.target {
            SummaryTarget::Url(url) => url.clone(),
            SummaryTarget::Upload { file_name, .. } if !file_name.trim().is_empty() => {
                file_name.clone()
            }
            SummaryTarget::Upload { .. } => DEFAULT_UPLOAD_TITLE.to_string(),
        }
    }

    /// Reject requests without a usable target
    pub fn validate(&self) -> Result<(), SessionError> {
        match &self.target {
            SummaryTarget::Url(url) if url.trim().is_empty() => {
                Err(SessionError::InvalidInput("no video link provided".to_string()))
            }
            SummaryTarget::Upload { payload, .. } if payload.is_empty() => {
                Err(SessionError::InvalidInput("no file selected".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Kind of downloadable artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    /// Plain-text transcript and summary
    Text,
    Pdf,
}

impl DownloadKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }
}

/// A backend-relative path to a downloadable artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub kind: DownloadKind,
    pub path: String,
}

impl DownloadLink {
    pub fn new(kind: DownloadKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Absolute URL of the artifact on the given backend origin
    pub fn resolve(&self, origin: &Url) -> Result<Url, url::ParseError> {
        origin.join(&self.path)
    }
}

/// Output of a successful request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_text: String,
    pub transcript_text: String,
    pub detected_language: Option<String>,
    pub download_links: Vec<DownloadLink>,
}

impl SummaryResult {
    pub fn link(&self, kind: DownloadKind) -> Option<&DownloadLink> {
        self.download_links.iter().find(|l| l.kind == kind)
    }
}
