//! Translation strategies.
//!
//! A strategy is one way of turning text in the source language into the
//! target language. The pipeline holds an ordered list of them and stops at
//! the first validated result:
//!
//! - `mymemory`: primary external service (Strategy A)
//! - `google`: secondary external service (Strategy B)
//! - `dictionary`: static cooking-word substitution (Strategy C)

pub mod dictionary;
pub mod google;
pub mod mymemory;

pub use dictionary::DictionaryStrategy;
pub use google::GoogleTranslateStrategy;
pub use mymemory::MyMemoryStrategy;

use crate::i18n::{Language, Rejection};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Source and target language of one translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    /// Translate from `source` into its sibling language.
    pub fn from_source(source: Language) -> Self {
        Self {
            source,
            target: source.sibling(),
        }
    }

    /// Pipe-separated form used by MyMemory (e.g. `en|am`).
    pub fn pipe_code(&self) -> String {
        format!("{}|{}", self.source.code(), self.target.code())
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source.code(), self.target.code())
    }
}

/// Why a strategy produced no usable translation.
///
/// None of these ever leave the pipeline; they only decide whether the
/// next strategy is tried.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response payload: {0}")]
    Payload(String),

    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("no dictionary words matched")]
    NoMatch,

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl StrategyError {
    /// Whether the service itself failed, as opposed to answering with
    /// something unusable.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            StrategyError::Http(_)
                | StrategyError::Status { .. }
                | StrategyError::Payload(_)
                | StrategyError::Timeout(_)
        )
    }
}

/// One translation method in the fallback chain.
#[async_trait]
pub trait TranslationStrategy: Send + Sync {
    /// Short name used in logs, metrics and reports.
    fn name(&self) -> &'static str;

    /// Attempt to translate `text`. The result is validated by the caller.
    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, StrategyError>;
}
