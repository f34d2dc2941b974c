use crate::config::Config;
use crate::translation::{LanguagePair, StrategyError, TranslationStrategy};
use async_trait::async_trait;
use tracing::debug;

/// Secondary translation service: Google's `translate_a/single` endpoint.
///
/// The response is an untyped nested array. The first element holds one
/// `[translated, original, ...]` entry per sentence.
pub struct GoogleTranslateStrategy {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslateStrategy {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(client, config.secondary_translate_url.clone())
    }
}

/// Join the translated segments of a `translate_a/single` payload.
fn extract_translation(payload: &serde_json::Value) -> Result<String, StrategyError> {
    let segments = payload
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| StrategyError::Payload("missing sentence array".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(StrategyError::Payload(
            "sentence array has no translated text".to_string(),
        ));
    }
    Ok(translated)
}

#[async_trait]
impl TranslationStrategy for GoogleTranslateStrategy {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, StrategyError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", pair.source.code()),
                ("tl", pair.target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(StrategyError::Status { status, body });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StrategyError::Payload(format!("invalid Google JSON: {}", e)))?;

        let translated = extract_translation(&payload)?;
        debug!("google: translated {} chars ({})", text.chars().count(), pair);
        Ok(translated)
    }
}
