use crate::config::Config;
use crate::translation::{LanguagePair, StrategyError, TranslationStrategy};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// MyMemory `GET /get` response
#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    /// Number on success, sometimes a numeric string on errors
    #[serde(rename = "responseStatus", default)]
    response_status: serde_json::Value,
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

fn status_code(value: &serde_json::Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Primary translation service: the MyMemory public API.
pub struct MyMemoryStrategy {
    client: reqwest::Client,
    api_url: String,
    contact_email: Option<String>,
}

impl MyMemoryStrategy {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            contact_email: None,
        }
    }

    /// Identify requests with an email (`de=`), which raises the daily quota.
    pub fn with_contact_email(mut self, email: Option<String>) -> Self {
        self.contact_email = email;
        self
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(client, config.primary_translate_url.clone())
            .with_contact_email(config.mymemory_email.clone())
    }
}

#[async_trait]
impl TranslationStrategy for MyMemoryStrategy {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, StrategyError> {
        let langpair = pair.pipe_code();
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = self.contact_email.as_deref() {
            query.push(("de", email));
        }

        let response = self.client.get(&self.api_url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(StrategyError::Status { status, body });
        }

        let payload: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| StrategyError::Payload(format!("invalid MyMemory JSON: {}", e)))?;

        let code = status_code(&payload.response_status);
        if code != Some(200) {
            return Err(StrategyError::Payload(format!(
                "MyMemory responseStatus {}",
                payload.response_status
            )));
        }

        let translated = payload
            .response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StrategyError::Payload("MyMemory returned no translatedText".to_string()))?;

        debug!("mymemory: translated {} chars ({})", text.chars().count(), pair);
        Ok(translated)
    }
}
