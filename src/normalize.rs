//! Bilingual record normalizer.
//!
//! Projects a stored recipe of either shape into plain strings for one
//! language. Lookup order for a language map is the requested language,
//! then English, then Amharic, then the field's default. Legacy plain
//! strings pass through unchanged. This is the only place that matches on
//! [`LocalizedField`].

use crate::i18n::{Language, LanguageContext};
use crate::recipe::{LocalizedField, Recipe, RecipeField};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Read-only projection of a recipe into one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedView {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub ingredients: String,
    pub steps: String,
    pub author_name: Option<String>,
    #[serde(rename = "videoURL")]
    pub video_url: Option<String>,
    pub has_image: bool,
    pub approved: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub original_language: Option<String>,
    pub auto_translated: bool,
    pub translation_error: bool,
}

/// Values emitted when a field has nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefaults {
    pub title: String,
    pub description: String,
    pub category: String,
    pub ingredients: String,
    pub steps: String,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: "Unknown".to_string(),
            ingredients: String::new(),
            steps: String::new(),
        }
    }
}

impl ViewDefaults {
    /// List-view sentinels in the viewer's language.
    pub fn localized(ctx: &LanguageContext) -> Self {
        let strings = ctx.strings();
        Self {
            title: strings.untitled.to_string(),
            description: strings.no_description.to_string(),
            category: strings.unknown_category.to_string(),
            ..Self::default()
        }
    }

    fn get(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::Title => &self.title,
            RecipeField::Description => &self.description,
            RecipeField::Category => &self.category,
            RecipeField::Ingredients => &self.ingredients,
            RecipeField::Steps => &self.steps,
        }
    }
}

/// Resolve one field. Empty map entries count as missing.
pub fn localize_field<'a>(
    field: Option<&'a LocalizedField>,
    language: Language,
    default: &'a str,
) -> &'a str {
    match field {
        Some(LocalizedField::Plain(text)) => text,
        Some(LocalizedField::Map(map)) => [language, Language::ENGLISH, Language::AMHARIC]
            .into_iter()
            .filter_map(|lang| map.get(lang))
            .find(|text| !text.is_empty())
            .unwrap_or(default),
        Some(LocalizedField::Malformed(_)) | None => default,
    }
}

/// Project `recipe` into `language` with the plain defaults.
pub fn normalize(recipe: &Recipe, language: Language) -> LocalizedView {
    normalize_with(recipe, language, &ViewDefaults::default())
}

/// Project `recipe` into `language`, using `defaults` for missing fields.
pub fn normalize_with(recipe: &Recipe, language: Language, defaults: &ViewDefaults) -> LocalizedView {
    let text = |field: RecipeField| {
        localize_field(recipe.field(field), language, defaults.get(field)).to_string()
    };

    LocalizedView {
        id: recipe.id.clone(),
        title: text(RecipeField::Title),
        description: text(RecipeField::Description),
        category: text(RecipeField::Category),
        ingredients: text(RecipeField::Ingredients),
        steps: text(RecipeField::Steps),
        author_name: recipe.author_name.clone(),
        video_url: recipe.video_url.clone(),
        has_image: recipe.has_image || recipe.image_base64.is_some(),
        approved: recipe.approved,
        created_at: recipe.created_at,
        original_language: recipe.original_language.clone(),
        auto_translated: recipe.auto_translated,
        translation_error: recipe.translation_error,
    }
}

/// Project a list of recipes, preserving order.
pub fn normalize_all(
    recipes: &[Recipe],
    language: Language,
    defaults: &ViewDefaults,
) -> Vec<LocalizedView> {
    recipes
        .iter()
        .map(|recipe| normalize_with(recipe, language, defaults))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::LanguageMap;
    use proptest::prelude::*;
    use serde_json::json;

    fn recipe_from(value: serde_json::Value) -> Recipe {
        serde_json::from_value(value).unwrap()
    }

    fn language() -> impl Strategy<Value = Language> {
        prop_oneof![Just(Language::ENGLISH), Just(Language::AMHARIC)]
    }

    // ==================== Shape Tests ====================

    #[test]
    fn test_legacy_record_passes_through() {
        let recipe = recipe_from(json!({
            "title": "Kitfo",
            "category": "Meat",
            "ingredients": "beef\nmitmita",
        }));

        for lang in [Language::ENGLISH, Language::AMHARIC] {
            let view = normalize(&recipe, lang);
            assert_eq!(view.title, "Kitfo");
            assert_eq!(view.category, "Meat");
            assert_eq!(view.ingredients, "beef\nmitmita");
            assert_eq!(view.description, "");
        }
    }

    #[test]
    fn test_bilingual_record_in_each_language() {
        let recipe = recipe_from(json!({
            "title": {"en": "Chickpea stew", "am": "ሽሮ"},
            "category": {"en": "Dinner", "am": "እራት ማታ"},
        }));

        assert_eq!(normalize(&recipe, Language::ENGLISH).title, "Chickpea stew");
        assert_eq!(normalize(&recipe, Language::AMHARIC).title, "ሽሮ");
        assert_eq!(normalize(&recipe, Language::AMHARIC).category, "እራት ማታ");
    }

    #[test]
    fn test_missing_language_falls_back_to_english_then_amharic() {
        let recipe = recipe_from(json!({
            "title": {"en": "Tibs"},
            "description": {"am": "የተጠበሰ ስጋ"},
        }));

        let view = normalize(&recipe, Language::AMHARIC);
        assert_eq!(view.title, "Tibs");

        let view = normalize(&recipe, Language::ENGLISH);
        assert_eq!(view.description, "የተጠበሰ ስጋ");
    }

    #[test]
    fn test_empty_entry_counts_as_missing() {
        let recipe = recipe_from(json!({"title": {"en": "Tibs", "am": ""}}));
        assert_eq!(normalize(&recipe, Language::AMHARIC).title, "Tibs");
    }

    #[test]
    fn test_absent_fields_use_defaults() {
        let view = normalize(&Recipe::default(), Language::ENGLISH);
        assert_eq!(view.title, "");
        assert_eq!(view.description, "");
        assert_eq!(view.category, "Unknown");
        assert_eq!(view.steps, "");
    }

    #[test]
    fn test_malformed_fields_use_defaults() {
        let recipe = recipe_from(json!({
            "title": 42,
            "category": ["Soup"],
            "steps": {"fr": "Cuire"},
        }));

        let view = normalize(&recipe, Language::ENGLISH);
        assert_eq!(view.title, "");
        assert_eq!(view.category, "Unknown");
        assert_eq!(view.steps, "");
    }

    #[test]
    fn test_localized_defaults() {
        let defaults = ViewDefaults::localized(&LanguageContext::new(Language::AMHARIC));
        let view = normalize_with(&Recipe::default(), Language::AMHARIC, &defaults);
        assert_eq!(view.title, "ርዕስ የሌለው");
        assert_eq!(view.category, "ያልታወቀ");
        assert_eq!(view.description, "መግለጫ የለም");
        assert_eq!(view.steps, "");

        let defaults = ViewDefaults::localized(&LanguageContext::new(Language::ENGLISH));
        let view = normalize_with(&Recipe::default(), Language::ENGLISH, &defaults);
        assert_eq!(view.title, "Untitled");
        assert_eq!(view.description, "No description available");
    }

    #[test]
    fn test_non_localizable_fields_are_copied() {
        let recipe = recipe_from(json!({
            "id": "recipe-7",
            "title": {"en": "Tibs"},
            "authorName": "almaz",
            "videoURL": "https://video.example/tibs",
            "imageBase64": "aGk=",
            "approved": true,
            "originalLanguage": "en",
            "autoTranslated": true,
            "translationError": true,
            "createdAt": "2024-03-01T12:00:00Z",
        }));

        let view = normalize(&recipe, Language::AMHARIC);
        assert_eq!(view.id.as_deref(), Some("recipe-7"));
        assert_eq!(view.author_name.as_deref(), Some("almaz"));
        assert_eq!(view.video_url.as_deref(), Some("https://video.example/tibs"));
        assert!(view.has_image);
        assert!(view.approved);
        assert!(view.auto_translated);
        assert!(view.translation_error);
        assert_eq!(view.original_language.as_deref(), Some("en"));
        assert!(view.created_at.is_some());
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let recipes: Vec<Recipe> = ["Shiro", "Tibs", "Kitfo"]
            .iter()
            .map(|t| Recipe {
                title: Some(LocalizedField::from(*t)),
                ..Recipe::default()
            })
            .collect();

        let titles: Vec<String> = normalize_all(&recipes, Language::ENGLISH, &ViewDefaults::default())
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, vec!["Shiro", "Tibs", "Kitfo"]);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = normalize(&Recipe::default(), Language::ENGLISH);
        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("hasImage").is_some());
        assert!(value.get("videoURL").is_some());
        assert!(value.get("translationError").is_some());
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_plain_string_is_language_independent(text in ".*", lang in language()) {
            let field = LocalizedField::Plain(text.clone());
            prop_assert_eq!(localize_field(Some(&field), lang, ""), text.as_str());
        }

        #[test]
        fn prop_requested_language_wins(
            en in "[a-z]{1,12}",
            am in "[ሀ-ፐ]{1,12}",
            lang in language(),
        ) {
            let field = LocalizedField::Map(LanguageMap { en: Some(en.clone()), am: Some(am.clone()) });
            let expected = if lang == Language::ENGLISH { en } else { am };
            prop_assert_eq!(localize_field(Some(&field), lang, ""), expected.as_str());
        }

        #[test]
        fn prop_missing_language_uses_english(en in "[a-z]{1,12}") {
            let field = LocalizedField::Map(LanguageMap::single(Language::ENGLISH, en.clone()));
            prop_assert_eq!(localize_field(Some(&field), Language::AMHARIC, ""), en.as_str());
        }

        #[test]
        fn prop_amharic_is_last_resort(am in "[ሀ-ፐ]{1,12}", lang in language()) {
            let field = LocalizedField::Map(LanguageMap::single(Language::AMHARIC, am.clone()));
            prop_assert_eq!(localize_field(Some(&field), lang, ""), am.as_str());
        }

        #[test]
        fn prop_any_json_never_panics(n in any::<i64>(), flag in any::<bool>(), lang in language()) {
            let recipe: Recipe = serde_json::from_value(json!({
                "title": n,
                "description": flag,
                "category": [n],
                "steps": {"en": n},
            })).unwrap();
            let view = normalize(&recipe, lang);
            prop_assert_eq!(view.title, "");
            prop_assert_eq!(view.category, "Unknown");
            prop_assert_eq!(view.steps, "");
        }
    }
}
