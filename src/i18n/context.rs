//! Active-language context.
//!
//! Holds the viewer's current language and resolves UI keys against the
//! registry's string tables, falling back to English and then to the key
//! itself.

use crate::i18n::{Language, LanguageStrings};

/// The language a viewer is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageContext {
    locale: Language,
}

impl LanguageContext {
    pub fn new(locale: Language) -> Self {
        Self { locale }
    }

    /// Current language.
    pub fn locale(&self) -> Language {
        self.locale
    }

    /// Switch the active language.
    pub fn set_locale(&mut self, locale: Language) {
        self.locale = locale;
    }

    /// String table for the active language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.locale.config().strings
    }

    /// Look up a UI string by key.
    ///
    /// Unknown keys fall back to the canonical language's table and finally
    /// to the key itself, so a missing entry is visible instead of blank.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let found: Option<&'a str> = self
            .strings()
            .lookup(key)
            .or_else(|| Language::canonical().config().strings.lookup(key));
        found.unwrap_or(key)
    }

    /// Display name of `language` in the active language.
    pub fn language_name(&self, language: Language) -> &'static str {
        let strings = self.strings();
        if language == Language::ENGLISH {
            strings.english
        } else {
            strings.amharic
        }
    }
}

impl Default for LanguageContext {
    fn default() -> Self {
        Self::new(Language::canonical())
    }
}
