use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Client for the public Google translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    /// Value of the `client` query parameter
    client_id: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, client_id: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("vtai/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            client_id: client_id.into(),
        })
    }
}

/// Join the translated chunks of a response
///
/// The body is a nested array whose first element holds
/// `[translated, original, ...]` tuples.
pub fn parse_translation_response(body: &Value) -> Result<String, ProviderError> {
    let chunks = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("missing translation chunks".to_string()))?;

    let parts: Vec<&str> = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    Ok(parts.join(" "))
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        debug!("Translating {} chars to {}", text.len(), target_language);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", self.client_id.as_str()),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Translation service error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parse_translation_response(&body)
    }
}
