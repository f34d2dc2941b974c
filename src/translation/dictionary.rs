use crate::dictionary::CookingDictionary;
use crate::translation::{LanguagePair, StrategyError, TranslationStrategy};
use async_trait::async_trait;

/// Last-resort strategy: whole-word substitution from the cooking dictionary.
///
/// Succeeds only when at least one word was replaced.
pub struct DictionaryStrategy {
    dictionary: &'static CookingDictionary,
}

impl DictionaryStrategy {
    pub fn new(dictionary: &'static CookingDictionary) -> Self {
        Self { dictionary }
    }
}

impl Default for DictionaryStrategy {
    fn default() -> Self {
        Self::new(CookingDictionary::builtin())
    }
}

#[async_trait]
impl TranslationStrategy for DictionaryStrategy {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, StrategyError> {
        self.dictionary
            .substitute(text, pair.target)
            .ok_or(StrategyError::NoMatch)
    }
}
