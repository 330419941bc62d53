use bytes::Bytes;
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::SummaryBackend;
use crate::session::{
    DownloadKind, DownloadLink, SummaryRequest, SummaryResult, SummarySize, SummaryTarget,
};

/// Path of the by-reference endpoint
const SUMMARIZE_PATH: &str = "/api/summarize";

/// Path of the by-upload endpoint
const SUMMARIZE_UPLOAD_PATH: &str = "/api/summarize_upload";

/// Client for the summarization backend
#[derive(Debug, Clone)]
pub struct HttpSummaryBackend {
    /// HTTP client for making requests
    client: Client,
    /// Backend origin, also used to resolve download links
    base_url: Url,
}

/// JSON body of a by-reference request
#[derive(Debug, Serialize)]
struct SummarizeBody<'a> {
    youtube_url: &'a str,
    summary_size: SummarySize,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    translate_to_english: bool,
}

/// Success response shared by both endpoints
#[derive(Debug, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub transcript: String,
    #[serde(default)]
    pub detected_language: Option<String>,
    #[serde(default)]
    pub download_txt_url: Option<String>,
    #[serde(default)]
    pub download_pdf_url: Option<String>,
}

impl From<SummarizeResponse> for SummaryResult {
    fn from(response: SummarizeResponse) -> Self {
        let mut download_links = Vec::new();
        if let Some(path) = response.download_txt_url {
            download_links.push(DownloadLink::new(DownloadKind::Text, path));
        }
        if let Some(path) = response.download_pdf_url {
            download_links.push(DownloadLink::new(DownloadKind::Pdf, path));
        }

        Self {
            summary_text: response.summary,
            transcript_text: response.transcript,
            detected_language: response.detected_language,
            download_links,
        }
    }
}

/// FastAPI-style error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extract a readable message from a non-2xx response body
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "Server error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

impl HttpSummaryBackend {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: Url) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("vtai/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the artifact behind a download link
    pub async fn download(&self, link: &DownloadLink) -> Result<Bytes, ProviderError> {
        let url = link
            .resolve(&self.base_url)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid download path '{}': {}", link.path, e)))?;

        debug!("Downloading {} artifact from {}", link.kind.extension(), url);

        let response = Self::check_status(self.client.get(url).send().await?).await?;
        Ok(response.bytes().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", path, e)))
    }

    fn upload_form(request: &SummaryRequest, file_name: &str, payload: &Bytes) -> Form {
        let part = Part::bytes(payload.to_vec()).file_name(file_name.to_string());
        let mut form = Form::new()
            .part("file", part)
            .text("summary_size", request.size.as_str());
        if let Some(language) = &request.language {
            form = form.text("language", language.clone());
        }
        if request.translate_to_english {
            form = form.text("translate_to_english", "true");
        }
        form
    }

    async fn check_status(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body);
        error!("Summarization backend error ({}): {}", status, message);
        Err(ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SummaryBackend for HttpSummaryBackend {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ProviderError> {
        let builder = match &request.target {
            SummaryTarget::Url(url) => {
                let body = SummarizeBody {
                    youtube_url: url,
                    summary_size: request.size,
                    language: request.language.as_deref(),
                    translate_to_english: request.translate_to_english,
                };
                self.client.post(self.endpoint(SUMMARIZE_PATH)?).json(&body)
            }
            SummaryTarget::Upload { file_name, payload } => {
                debug!("Uploading {} bytes as '{}'", payload.len(), file_name);
                self.client
                    .post(self.endpoint(SUMMARIZE_UPLOAD_PATH)?)
                    .multipart(Self::upload_form(request, file_name, payload))
            }
        };

        let response = Self::check_status(builder.send().await?).await?;
        let parsed: SummarizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed.into())
    }
}
