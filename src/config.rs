use crate::i18n::Language;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_PRIMARY_TRANSLATE_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_SECONDARY_TRANSLATE_URL: &str =
    "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TRANSLATE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    // Environment (development, production)
    pub environment: String,

    // Translation services
    pub primary_translate_url: String,
    pub secondary_translate_url: String,
    pub mymemory_email: Option<String>,
    pub translate_timeout: Duration,

    // Storage (in-memory store when unset)
    pub database_url: Option<String>,

    // UI language for receipts and views
    pub default_locale: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            primary_translate_url: DEFAULT_PRIMARY_TRANSLATE_URL.to_string(),
            secondary_translate_url: DEFAULT_SECONDARY_TRANSLATE_URL.to_string(),
            mymemory_email: None,
            translate_timeout: Duration::from_secs(DEFAULT_TRANSLATE_TIMEOUT_SECS),
            database_url: None,
            default_locale: Language::canonical(),
        }
    }
}

/// Non-empty value of an environment variable.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = match optional_var("APP_LOCALE") {
            Some(code) => Language::from_code(&code).context("APP_LOCALE must be 'en' or 'am'")?,
            None => Language::canonical(),
        };

        Ok(Self {
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            // Translation services
            primary_translate_url: std::env::var("PRIMARY_TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_PRIMARY_TRANSLATE_URL.to_string()),
            secondary_translate_url: std::env::var("SECONDARY_TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_SECONDARY_TRANSLATE_URL.to_string()),
            mymemory_email: optional_var("MYMEMORY_EMAIL"),
            translate_timeout: Duration::from_secs(
                std::env::var("TRANSLATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_TRANSLATE_TIMEOUT_SECS),
            ),

            // Storage
            database_url: optional_var("DATABASE_URL"),

            default_locale,
        })
    }
}
