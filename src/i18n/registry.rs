//! Language registry: Single source of truth for the two recipe languages.
//!
//! Recipes are authored and displayed in English and Amharic only. The
//! registry is built once on first access (`OnceLock`) and is immutable
//! thereafter.

use crate::i18n::strings::{AMHARIC_STRINGS, ENGLISH_STRINGS};
use crate::i18n::LanguageStrings;
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code ("en" or "am")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Amharic")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "አማርኛ")
    pub native_name: &'static str,

    /// Whether this is the universal fallback language (only one should be true)
    pub is_canonical: bool,

    /// Localized UI strings for this language
    pub strings: &'static LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all languages, canonical first.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the canonical language configuration.
    ///
    /// The canonical language is the last-resort display language for
    /// bilingual records (English).
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// English (canonical) and Amharic.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            strings: &ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "am",
            name: "Amharic",
            native_name: "አማርኛ",
            is_canonical: false,
            strings: &AMHARIC_STRINGS,
        },
    ]
}
