/*!
 * Tests for collaborator clients and mocks
 */

use serde_json::json;
use url::Url;

use vtai::errors::ProviderError;
use vtai::providers::google_translate::{parse_translation_response, GoogleTranslator};
use vtai::providers::mock::{MockSummaryBackend, MockTranslator};
use vtai::providers::summarizer::error_detail;
use vtai::providers::{HttpSummaryBackend, SummaryBackend, Translator};
use vtai::session::{DownloadKind, SummaryRequest, SummarySize};

use crate::common::{capture_one_request, form_field};

const SUMMARY_REPLY: &str = r#"{"summary":"short","transcript":"long","download_txt_url":"/download/txt/1"}"#;

#[test]
fn test_parseTranslationResponse_withSingleChunk_shouldReturnIt() {
    let body = json!([[["Hola", "Hello", null, null, 10]], null, "en", null, null, null, 1.0]);
    assert_eq!(parse_translation_response(&body).unwrap(), "Hola");
}

#[test]
fn test_parseTranslationResponse_withEmptyChunks_shouldReturnEmptyText() {
    let body = json!([[], null, "en"]);
    assert_eq!(parse_translation_response(&body).unwrap(), "");
}

#[test]
fn test_parseTranslationResponse_withNullFirstElement_shouldFail() {
    assert!(parse_translation_response(&json!([null])).is_err());
}

#[test]
fn test_errorDetail_withStructuredDetail_shouldRenderJson() {
    let body = r#"{"detail":[{"loc":["body","youtube_url"],"msg":"field required"}]}"#;
    assert!(error_detail(body).contains("field required"));
}

#[test]
fn test_httpSummaryBackend_shouldKeepBaseUrlForDownloads() {
    let backend = HttpSummaryBackend::new(Url::parse("http://localhost:8000").unwrap()).unwrap();
    assert_eq!(backend.base_url().as_str(), "http://localhost:8000/");
}

#[tokio::test]
async fn test_mockSummaryBackend_working_shouldReturnLinksAndCountCalls() {
    let backend = MockSummaryBackend::working();
    let request = SummaryRequest::by_upload("lecture.mp3", vec![0u8; 8], SummarySize::Large).with_language("hi");

    let result = backend.summarize(&request).await.unwrap();

    assert!(result.summary_text.contains("lecture.mp3"));
    assert_eq!(result.detected_language.as_deref(), Some("hi"));
    assert!(result.link(DownloadKind::Pdf).is_some());
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn test_mockTranslator_failing_shouldReturnProviderError() {
    let translator = MockTranslator::failing();
    let result = translator.translate("hello", "fr").await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_summarize_withUpload_shouldSendMultipartFields() {
    let (addr, captured) = capture_one_request(SUMMARY_REPLY).await;
    let backend = HttpSummaryBackend::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap();
    let request = SummaryRequest::by_upload("clip.mp4", b"not really video".to_vec(), SummarySize::Medium)
        .with_language("hi")
        .with_translate_to_english(true);

    let result = backend.summarize(&request).await.unwrap();
    let raw = captured.await.unwrap();

    assert_eq!(result.summary_text, "short");
    assert!(raw.starts_with("POST /api/summarize_upload "), "{}", raw);
    assert!(raw.contains(r#"name="file"; filename="clip.mp4""#));
    assert_eq!(form_field(&raw, "file").as_deref(), Some("not really video"));
    assert_eq!(form_field(&raw, "summary_size").as_deref(), Some("medium"));
    assert_eq!(form_field(&raw, "language").as_deref(), Some("hi"));
    assert_eq!(form_field(&raw, "translate_to_english").as_deref(), Some("true"));
}

#[tokio::test]
async fn test_summarize_withUploadDefaults_shouldOmitOptionalFields() {
    let (addr, captured) = capture_one_request(SUMMARY_REPLY).await;
    let backend = HttpSummaryBackend::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap();
    let request = SummaryRequest::by_upload("clip.mp4", b"bytes".to_vec(), SummarySize::Small);

    backend.summarize(&request).await.unwrap();
    let raw = captured.await.unwrap();

    assert_eq!(form_field(&raw, "summary_size").as_deref(), Some("small"));
    assert!(form_field(&raw, "language").is_none());
    assert!(!raw.contains("translate_to_english"));
}

#[tokio::test]
async fn test_summarize_byReference_shouldPostJsonBody() {
    let (addr, captured) = capture_one_request(SUMMARY_REPLY).await;
    let backend = HttpSummaryBackend::new(Url::parse(&format!("http://{}", addr)).unwrap()).unwrap();
    let request = SummaryRequest::by_reference("https://youtu.be/x", SummarySize::Large).with_translate_to_english(true);

    let result = backend.summarize(&request).await.unwrap();
    let raw = captured.await.unwrap();

    assert_eq!(result.link(DownloadKind::Text).map(|l| l.path.as_str()), Some("/download/txt/1"));
    assert!(raw.starts_with("POST /api/summarize "), "{}", raw);
    let body: serde_json::Value = serde_json::from_str(&raw[raw.find("\r\n\r\n").unwrap() + 4..]).unwrap();
    assert_eq!(
        body,
        json!({"youtube_url": "https://youtu.be/x", "summary_size": "large", "translate_to_english": true})
    );
}

#[tokio::test]
async fn test_googleTranslator_shouldSendGtxQueryParameters() {
    let (addr, captured) = capture_one_request(r#"[[["bonjour le monde","hello world",null,null,10]],null,"en"]"#).await;
    let translator = GoogleTranslator::new(format!("http://{}/translate_a/single", addr), "gtx").unwrap();

    let translated = translator.translate("hello world", "fr").await.unwrap();
    let raw = captured.await.unwrap();

    assert_eq!(translated, "bonjour le monde");
    let request_line = raw.lines().next().unwrap();
    assert!(request_line.starts_with("GET /translate_a/single?"), "{}", request_line);
    for param in ["client=gtx", "sl=auto", "tl=fr", "dt=t"] {
        assert!(request_line.contains(param), "missing {} in {}", param, request_line);
    }
    assert!(
        request_line.contains("q=hello+world") || request_line.contains("q=hello%20world"),
        "{}",
        request_line
    );
}
