//! Recipe record model.
//!
//! A persisted recipe may be in the legacy shape (every localizable field is
//! a plain string) or the bilingual shape (every localizable field maps a
//! language code to a string). Records come from a shared store that older
//! code also wrote to, so deserialization never fails on an odd field
//! shape: anything unrecognised is kept as [`LocalizedField::Malformed`].

use crate::i18n::Language;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

// ==================== Localized Fields ====================

/// Per-language values of one field. Only `en` and `am` are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub am: Option<String>,
}

impl LanguageMap {
    /// Map with a single entry.
    pub fn single(language: Language, text: impl Into<String>) -> Self {
        let mut map = Self::default();
        map.insert(language, text);
        map
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        if language == Language::AMHARIC {
            self.am.as_deref()
        } else {
            self.en.as_deref()
        }
    }

    pub fn insert(&mut self, language: Language, text: impl Into<String>) {
        let slot = if language == Language::AMHARIC {
            &mut self.am
        } else {
            &mut self.en
        };
        *slot = Some(text.into());
    }

    pub fn contains(&self, language: Language) -> bool {
        self.get(language).is_some()
    }
}

impl<'de> Deserialize<'de> for LanguageMap {
    /// Accepts any JSON object; entries other than string-valued `en`/`am`
    /// are dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let pick = |code: &str| raw.get(code).and_then(|v| v.as_str()).map(str::to_string);
        Ok(Self {
            en: pick("en"),
            am: pick("am"),
        })
    }
}

/// The stored value of one localizable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedField {
    /// Legacy single-language value
    Plain(String),
    /// Bilingual value
    Map(LanguageMap),
    /// Anything else found in the store (numbers, arrays, ...)
    Malformed(serde_json::Value),
}

impl LocalizedField {
    /// Bilingual field holding only `language`.
    pub fn single(language: Language, text: impl Into<String>) -> Self {
        LocalizedField::Map(LanguageMap::single(language, text))
    }

    pub fn as_map(&self) -> Option<&LanguageMap> {
        match self {
            LocalizedField::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut LanguageMap> {
        match self {
            LocalizedField::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for LocalizedField {
    fn from(text: &str) -> Self {
        LocalizedField::Plain(text.to_string())
    }
}

impl From<LanguageMap> for LocalizedField {
    fn from(map: LanguageMap) -> Self {
        LocalizedField::Map(map)
    }
}

/// The five localizable fields of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeField {
    Title,
    Description,
    Category,
    Ingredients,
    Steps,
}

impl RecipeField {
    pub const ALL: [RecipeField; 5] = [
        RecipeField::Title,
        RecipeField::Description,
        RecipeField::Category,
        RecipeField::Ingredients,
        RecipeField::Steps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecipeField::Title => "title",
            RecipeField::Description => "description",
            RecipeField::Category => "category",
            RecipeField::Ingredients => "ingredients",
            RecipeField::Steps => "steps",
        }
    }
}

impl fmt::Display for RecipeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Recipe ====================

/// A persisted recipe document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Assigned by the store on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<LocalizedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<LocalizedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<LocalizedField>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub image_base64: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_image: bool,
    #[serde(
        rename = "videoURL",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub video_url: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub author_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub author_email: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub author_name: Option<String>,

    #[serde(deserialize_with = "lenient_bool")]
    pub approved: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Language the author typed in (raw code as stored)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub original_language: Option<String>,
    /// The translation run finished without an unhandled failure
    #[serde(deserialize_with = "lenient_bool")]
    pub auto_translated: bool,
    /// At least one field fell back to source text or stayed empty
    #[serde(deserialize_with = "lenient_bool")]
    pub translation_error: bool,
}

impl Recipe {
    /// A bilingual record holding only the author's language, with the
    /// non-localizable fields copied from `draft`. Not yet persisted.
    pub fn from_draft(draft: &RecipeDraft) -> Recipe {
        let lang = draft.source_language;
        let mut recipe = Recipe {
            image_base64: draft.image_base64.clone(),
            has_image: draft.image_base64.is_some(),
            video_url: draft.video_url.clone().filter(|v| !v.trim().is_empty()),
            author_id: Some(draft.author.id.clone()),
            author_email: Some(draft.author.email.clone()),
            author_name: Some(draft.author.display_name().to_string()),
            original_language: Some(lang.code().to_string()),
            ..Recipe::default()
        };
        for field in RecipeField::ALL {
            *recipe.field_mut(field) = Some(LocalizedField::single(lang, draft.text(field)));
        }
        recipe
    }

    pub fn field(&self, field: RecipeField) -> Option<&LocalizedField> {
        match field {
            RecipeField::Title => self.title.as_ref(),
            RecipeField::Description => self.description.as_ref(),
            RecipeField::Category => self.category.as_ref(),
            RecipeField::Ingredients => self.ingredients.as_ref(),
            RecipeField::Steps => self.steps.as_ref(),
        }
    }

    pub fn field_mut(&mut self, field: RecipeField) -> &mut Option<LocalizedField> {
        match field {
            RecipeField::Title => &mut self.title,
            RecipeField::Description => &mut self.description,
            RecipeField::Category => &mut self.category,
            RecipeField::Ingredients => &mut self.ingredients,
            RecipeField::Steps => &mut self.steps,
        }
    }

    /// Parsed `original_language`, if it is a known code.
    pub fn original_language(&self) -> Option<Language> {
        self.original_language
            .as_deref()
            .and_then(|code| Language::from_code(code).ok())
    }

    /// Whether any localizable field is a language map.
    pub fn is_bilingual(&self) -> bool {
        RecipeField::ALL
            .iter()
            .any(|f| matches!(self.field(*f), Some(LocalizedField::Map(_))))
    }
}

// ==================== Lenient Readers ====================
//
// Non-localizable fields of older records get the same treatment as the
// localizable ones: a value of the wrong shape reads as absent instead of
// failing the whole document.

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_str().map(str::to_string))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(parse_timestamp(&Value::deserialize(deserializer)?))
}

/// RFC 3339 strings, or the `{seconds, nanoseconds}` object that server
/// timestamps are stored as (`_seconds`/`_nanoseconds` in exports).
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Object(fields) => {
            let part = |name: &str| {
                fields
                    .get(name)
                    .or_else(|| fields.get(&format!("_{}", name)))
            };
            let seconds = part("seconds")?.as_i64()?;
            let nanos = match part("nanoseconds") {
                Some(n) => u32::try_from(n.as_u64()?).ok()?,
                None => 0,
            };
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

// ==================== Drafts ====================

/// The submitting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Author {
    /// Profile name, or the local part of the email address.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// A recipe as typed by its author, in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub source_language: Language,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, rename = "videoURL", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub author: Author,
}

/// A required draft field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a photo of the dish is required")]
    MissingImage,
    #[error("title is required")]
    MissingTitle,
    #[error("category is required")]
    MissingCategory,
    #[error("ingredients are required")]
    MissingIngredients,
    #[error("steps are required")]
    MissingSteps,
}

impl DraftError {
    /// UI string key for this error.
    pub fn message_key(self) -> &'static str {
        match self {
            DraftError::MissingImage => "addRecipe.errors.missingImageMessage",
            DraftError::MissingTitle => "addRecipe.errors.missingTitleMessage",
            DraftError::MissingCategory => "addRecipe.errors.missingCategoryMessage",
            DraftError::MissingIngredients => "addRecipe.errors.missingIngredientsMessage",
            DraftError::MissingSteps => "addRecipe.errors.missingStepsMessage",
        }
    }
}

impl RecipeDraft {
    /// Empty draft in `source_language`.
    pub fn new(source_language: Language, author: Author) -> Self {
        Self {
            source_language,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            ingredients: String::new(),
            steps: String::new(),
            image_base64: None,
            video_url: None,
            author,
        }
    }

    /// Source text of a localizable field.
    pub fn text(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::Title => &self.title,
            RecipeField::Description => &self.description,
            RecipeField::Category => &self.category,
            RecipeField::Ingredients => &self.ingredients,
            RecipeField::Steps => &self.steps,
        }
    }

    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            ingredients: self.ingredients.trim().to_string(),
            steps: self.steps.trim().to_string(),
            video_url: self.video_url.as_deref().map(|v| v.trim().to_string()),
            ..self.clone()
        }
    }

    /// Check required fields in form order: image, title, category,
    /// ingredients, steps. Description and video are optional.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.image_base64.as_deref().map_or(true, |img| img.trim().is_empty()) {
            return Err(DraftError::MissingImage);
        }
        let required = [
            (&self.title, DraftError::MissingTitle),
            (&self.category, DraftError::MissingCategory),
            (&self.ingredients, DraftError::MissingIngredients),
            (&self.steps, DraftError::MissingSteps),
        ];
        for (value, error) in required {
            if value.trim().is_empty() {
                return Err(error);
            }
        }
        Ok(())
    }
}

// ==================== Files ====================

/// Read a JSON document (a draft or a stored recipe) from disk.
pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}
