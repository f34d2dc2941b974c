//! Browse filters over localized recipe views.
//!
//! Search runs on what the viewer actually sees, so a recipe is found by
//! its title in the viewer's language (or the fallback that was shown).

use crate::category::Category;
use crate::i18n::Language;
use crate::normalize::{normalize_all, LocalizedView, ViewDefaults};
use crate::recipe::Recipe;

/// Search query plus optional category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
}

impl BrowseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank queries match everything.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, view: &LocalizedView) -> bool {
        let query_ok = self
            .query
            .as_deref()
            .map_or(true, |query| matches_query(view, query));
        let category_ok = self
            .category
            .map_or(true, |category| matches_category(view, category));
        query_ok && category_ok
    }

    /// Views that pass the filter, in their original order.
    pub fn apply<'a>(&self, views: &'a [LocalizedView]) -> Vec<&'a LocalizedView> {
        views.iter().filter(|view| self.matches(view)).collect()
    }
}

/// Case-insensitive substring match on title, description, category and
/// ingredients.
pub fn matches_query(view: &LocalizedView, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        &view.title,
        &view.description,
        &view.category,
        &view.ingredients,
    ]
    .iter()
    .any(|text| text.to_lowercase().contains(&needle))
}

/// Whether the view's category is `category`, named in either language.
pub fn matches_category(view: &LocalizedView, category: Category) -> bool {
    Category::lookup(&view.category) == Some(category)
}

/// Localize `recipes` into `language` and keep those matching `filter`.
pub fn browse(
    recipes: &[Recipe],
    language: Language,
    defaults: &ViewDefaults,
    filter: &BrowseFilter,
) -> Vec<LocalizedView> {
    normalize_all(recipes, language, defaults)
        .into_iter()
        .filter(|view| filter.matches(view))
        .collect()
}
