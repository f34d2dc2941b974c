//! Recipe submission flow.
//!
//! Validate the draft, translate it, persist the bilingual record once and
//! tell the author what happened in their own language. Translation
//! problems never stop a submission; only a failed write does.

use crate::i18n::LanguageContext;
use crate::pipeline::{TranslationPipeline, TranslationReport};
use crate::recipe::{DraftError, RecipeDraft};
use crate::store::{RecipeStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("recipe draft is incomplete: {0}")]
    InvalidDraft(#[from] DraftError),

    #[error("recipe could not be saved: {0}")]
    Persistence(#[from] StoreError),
}

impl SubmissionError {
    /// UI string key for the message shown to the author.
    pub fn message_key(&self) -> &'static str {
        match self {
            SubmissionError::InvalidDraft(e) => e.message_key(),
            SubmissionError::Persistence(_) => "addRecipe.errors.uploadMessage",
        }
    }

    /// Message for the author in the active language.
    pub fn user_message(&self, ctx: &LanguageContext) -> String {
        ctx.t(self.message_key()).to_string()
    }
}

/// What the author is told after a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: String,
    pub auto_translated: bool,
    pub translation_error: bool,
    pub report: TranslationReport,
    pub message: String,
}

/// Submit `draft`: validate, translate, persist once.
pub async fn submit_recipe(
    pipeline: &TranslationPipeline,
    store: &dyn RecipeStore,
    draft: &RecipeDraft,
    ctx: &LanguageContext,
) -> Result<SubmissionReceipt, SubmissionError> {
    let draft = draft.trimmed();
    draft.validate()?;

    let translated = pipeline.translate_draft(&draft).await;
    let report = translated.report;

    let id = store.create(translated.recipe).await.map_err(|e| {
        error!("Failed to save recipe '{}': {}", draft.title, e);
        e
    })?;

    let key = if report.auto_translated && !report.translation_error {
        "addRecipe.success.translationSuccess"
    } else {
        "addRecipe.success.translationPartial"
    };
    let message = ctx
        .t(key)
        .replace("{language}", ctx.language_name(report.target_language));

    info!(
        "Recipe {} submitted by {} ({} -> {})",
        id,
        draft.author.display_name(),
        report.source_language,
        report.target_language
    );

    Ok(SubmissionReceipt {
        id,
        auto_translated: report.auto_translated,
        translation_error: report.translation_error,
        report,
        message,
    })
}
