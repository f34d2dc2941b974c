//! Translation pipeline.
//!
//! Takes a single-language draft and fills in the sibling language for every
//! localizable field. Each text goes through the strategy chain in order and
//! the first validated result wins. When every strategy fails the source text
//! is kept. Nothing in here returns an error to the caller: the worst case is
//! a record whose sibling entries equal the source, flagged as degraded.
//!
//! Fields run concurrently, and so do the lines of multi-line fields. No task
//! is spawned, so dropping the returned future abandons every in-flight call.

use crate::category::Category;
use crate::config::Config;
use crate::i18n::{Language, TranslationMetrics, TranslationValidator};
use crate::lines;
use crate::recipe::{LocalizedField, Recipe, RecipeDraft, RecipeField};
use crate::translation::{
    DictionaryStrategy, GoogleTranslateStrategy, LanguagePair, MyMemoryStrategy, StrategyError,
    TranslationStrategy,
};
use anyhow::{Context, Result};
use futures::future::join_all;
use futures::FutureExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Per-call bound used when no configuration is given.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Strategy name reported when the lines of one field were served by
/// different strategies.
pub const MIXED_STRATEGIES: &str = "mixed";

/// A validated translation and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub strategy: &'static str,
}

/// How one field ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FieldStatus {
    /// Every text in the field was translated
    Translated { strategy: &'static str },
    /// Category resolved from the enumeration without any strategy
    Catalog,
    /// Some lines fell back to their source text
    Partial { fallbacks: usize, total: usize },
    /// Every strategy failed; the sibling entry is a copy of the source
    Fallback,
    /// Source was blank; nothing was sent anywhere
    Skipped,
}

impl FieldStatus {
    /// Whether this field sets the record-level `translationError` flag.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            FieldStatus::Partial { .. } | FieldStatus::Fallback | FieldStatus::Skipped
        )
    }
}

/// Result of translating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub status: FieldStatus,
    /// Value for the sibling-language entry; `None` leaves it absent
    pub sibling: Option<String>,
}

impl FieldOutcome {
    fn skipped() -> Self {
        Self {
            status: FieldStatus::Skipped,
            sibling: None,
        }
    }

    fn fallback(source: &str) -> Self {
        Self {
            status: FieldStatus::Fallback,
            sibling: Some(source.to_string()),
        }
    }
}

/// Per-field summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationReport {
    pub source_language: Language,
    pub target_language: Language,
    pub fields: BTreeMap<RecipeField, FieldStatus>,
    pub auto_translated: bool,
    pub translation_error: bool,
}

impl TranslationReport {
    pub fn status(&self, field: RecipeField) -> Option<&FieldStatus> {
        self.fields.get(&field)
    }
}

/// A bilingual record ready to persist, plus how it was produced.
#[derive(Debug, Clone)]
pub struct TranslatedRecipe {
    pub recipe: Recipe,
    pub report: TranslationReport,
}

pub struct TranslationPipeline {
    strategies: Vec<Box<dyn TranslationStrategy>>,
    attempt_timeout: Duration,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationPipeline {
    /// Pipeline over `strategies`, tried in the given order.
    pub fn new(strategies: Vec<Box<dyn TranslationStrategy>>) -> Self {
        Self {
            strategies,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// MyMemory, then Google, then the built-in cooking dictionary.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.translate_timeout)
            .build()
            .context("Failed to build HTTP client for translation services")?;

        let strategies: Vec<Box<dyn TranslationStrategy>> = vec![
            Box::new(MyMemoryStrategy::from_config(client.clone(), config)),
            Box::new(GoogleTranslateStrategy::from_config(client, config)),
            Box::new(DictionaryStrategy::default()),
        ];

        Ok(Self::new(strategies).with_attempt_timeout(config.translate_timeout))
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn metrics(&self) -> Arc<TranslationMetrics> {
        Arc::clone(&self.metrics)
    }

    /// One strategy call, bounded by the attempt timeout and validated.
    async fn attempt(
        &self,
        strategy: &dyn TranslationStrategy,
        text: &str,
        pair: LanguagePair,
    ) -> Result<String, StrategyError> {
        let candidate = tokio::time::timeout(self.attempt_timeout, strategy.translate(text, pair))
            .await
            .map_err(|_| StrategyError::Timeout(self.attempt_timeout))??;

        TranslationValidator::check(text, &candidate)?;
        Ok(candidate.trim().to_string())
    }

    /// Run `text` through the strategy chain.
    ///
    /// Returns `None` when `text` is blank or no strategy produced a valid
    /// translation. Failed strategies are never retried.
    pub async fn translate_text(&self, text: &str, pair: LanguagePair) -> Option<Translation> {
        if text.trim().is_empty() {
            return None;
        }

        for strategy in &self.strategies {
            let name = strategy.name();
            self.metrics.record_attempt(name);

            match self.attempt(strategy.as_ref(), text, pair).await {
                Ok(translated) => {
                    self.metrics.record_success(name);
                    return Some(Translation {
                        text: translated,
                        strategy: name,
                    });
                }
                Err(e) => {
                    self.metrics.record_failure(name);
                    if e.is_service_failure() {
                        warn!("{}: {} failed: {}", pair, name, e);
                    } else {
                        debug!("{}: {} gave no usable result: {}", pair, name, e);
                    }
                }
            }
        }

        None
    }

    /// Translate one field of a draft into the sibling of `pair.source`.
    pub async fn translate_field(
        &self,
        field: RecipeField,
        text: &str,
        pair: LanguagePair,
    ) -> FieldOutcome {
        let text = text.trim();
        if text.is_empty() {
            self.metrics.record_skipped();
            debug!("{}: blank, not translated", field);
            return FieldOutcome::skipped();
        }

        if field == RecipeField::Category {
            if let Some(category) = Category::lookup(text) {
                self.metrics.record_catalog_hit();
                debug!("{}: matched '{}' in the category list", field, category.en());
                return FieldOutcome {
                    status: FieldStatus::Catalog,
                    sibling: Some(category.name(pair.target).to_string()),
                };
            }
        }

        let multiline_field = matches!(field, RecipeField::Ingredients | RecipeField::Steps);
        if multiline_field && lines::is_multiline(text) {
            return self.translate_lines(field, text, pair).await;
        }

        match self.translate_text(text, pair).await {
            Some(translation) => FieldOutcome {
                status: FieldStatus::Translated {
                    strategy: translation.strategy,
                },
                sibling: Some(translation.text),
            },
            None => {
                self.metrics.record_fallback();
                warn!("{}: every strategy failed, keeping source text", field);
                FieldOutcome::fallback(text)
            }
        }
    }

    /// Translate each non-blank line independently. Steps lose their old
    /// ordinals before translation and are renumbered afterwards.
    async fn translate_lines(
        &self,
        field: RecipeField,
        text: &str,
        pair: LanguagePair,
    ) -> FieldOutcome {
        let mut segments = lines::non_blank_lines(text);
        if field == RecipeField::Steps {
            segments = segments.into_iter().map(lines::strip_ordinal).collect();
        }

        // join_all yields results in input order, whatever order they finish in
        let results = join_all(segments.iter().map(|segment| async move {
            if segment.is_empty() {
                None
            } else {
                self.translate_text(segment, pair).await
            }
        }))
        .await;

        let mut output = Vec::with_capacity(segments.len());
        let mut used = Vec::new();
        let mut fallbacks = 0;
        let mut total = 0;

        for (segment, result) in segments.iter().zip(results) {
            if segment.is_empty() {
                output.push(String::new());
                continue;
            }
            total += 1;
            match result {
                Some(translation) => {
                    used.push(translation.strategy);
                    output.push(translation.text);
                }
                None => {
                    fallbacks += 1;
                    self.metrics.record_fallback();
                    output.push((*segment).to_string());
                }
            }
        }

        if total == 0 {
            self.metrics.record_skipped();
            return FieldOutcome::skipped();
        }

        if field == RecipeField::Steps {
            output = lines::renumber(&output);
        }

        let status = if fallbacks == 0 {
            FieldStatus::Translated {
                strategy: common_strategy(&used),
            }
        } else if fallbacks == total {
            FieldStatus::Fallback
        } else {
            FieldStatus::Partial { fallbacks, total }
        };

        if fallbacks > 0 {
            warn!(
                "{}: {} of {} lines kept their source text",
                field, fallbacks, total
            );
        }

        FieldOutcome {
            status,
            sibling: Some(output.join("\n")),
        }
    }

    /// `translate_field` with panics contained to the field.
    async fn settle_field(
        &self,
        field: RecipeField,
        text: &str,
        pair: LanguagePair,
    ) -> Option<FieldOutcome> {
        match AssertUnwindSafe(self.translate_field(field, text, pair))
            .catch_unwind()
            .await
        {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                error!("{}: translation panicked, keeping source text", field);
                None
            }
        }
    }

    /// Translate every localizable field of `draft`.
    pub async fn translate_draft(&self, draft: &RecipeDraft) -> TranslatedRecipe {
        let pair = LanguagePair::from_source(draft.source_language);
        info!("Translating recipe '{}' ({})", draft.title.trim(), pair);

        let outcomes = join_all(
            RecipeField::ALL.map(|field| self.settle_field(field, draft.text(field), pair)),
        )
        .await;

        let mut recipe = Recipe::from_draft(draft);
        let mut fields = BTreeMap::new();
        let mut panicked = false;

        for (field, outcome) in RecipeField::ALL.into_iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|| {
                panicked = true;
                let source = draft.text(field).trim();
                if source.is_empty() {
                    FieldOutcome::skipped()
                } else {
                    FieldOutcome::fallback(source)
                }
            });

            if let Some(sibling) = outcome.sibling {
                if let Some(map) = recipe
                    .field_mut(field)
                    .as_mut()
                    .and_then(LocalizedField::as_map_mut)
                {
                    map.insert(pair.target, sibling);
                }
            }
            fields.insert(field, outcome.status);
        }

        let auto_translated = !panicked;
        let translation_error = panicked || fields.values().any(FieldStatus::is_degraded);
        recipe.auto_translated = auto_translated;
        recipe.translation_error = translation_error;

        info!(
            "Translation to {} finished: autoTranslated={}, translationError={}",
            pair.target.name(),
            auto_translated,
            translation_error
        );

        TranslatedRecipe {
            recipe,
            report: TranslationReport {
                source_language: pair.source,
                target_language: pair.target,
                fields,
                auto_translated,
                translation_error,
            },
        }
    }
}

fn common_strategy(used: &[&'static str]) -> &'static str {
    match used.split_first() {
        Some((first, rest)) if rest.iter().all(|s| s == first) => *first,
        _ => MIXED_STRATEGIES,
    }
}
