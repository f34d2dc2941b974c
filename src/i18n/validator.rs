//! Translation result validation.
//!
//! Every external translation service is untrusted. A candidate is only
//! accepted when it is non-empty, is not a stringified null sentinel, and
//! actually differs from the text that was sent.

use thiserror::Error;

/// Why a candidate translation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("translation is empty")]
    Empty,

    #[error("translation is the literal sentinel '{0}'")]
    Sentinel(String),

    #[error("translation is identical to the source text")]
    Echo,
}

/// Validator for translation candidates.
pub struct TranslationValidator;

/// Literal strings some services return instead of an error.
const SENTINELS: &[&str] = &["undefined", "null"];

impl TranslationValidator {
    /// Check a candidate translation of `original`.
    ///
    /// Comparison ignores surrounding whitespace. Sentinels match only in
    /// their exact lowercase spelling.
    pub fn check(original: &str, candidate: &str) -> Result<(), Rejection> {
        let candidate = candidate.trim();

        if candidate.is_empty() {
            return Err(Rejection::Empty);
        }

        if let Some(sentinel) = SENTINELS.iter().find(|s| candidate == **s) {
            return Err(Rejection::Sentinel((*sentinel).to_string()));
        }

        if candidate == original.trim() {
            return Err(Rejection::Echo);
        }

        Ok(())
    }

    /// Convenience wrapper for callers that only need a yes/no answer.
    pub fn is_valid(original: &str, candidate: &str) -> bool {
        Self::check(original, candidate).is_ok()
    }
}
