//! Internationalization (i18n) module for the two recipe languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for English and Amharic and their metadata
//! - `language`: Type-safe `Language` that can only hold a registered code
//! - `strings`: Localized UI strings (sentinels, submission messages)
//! - `context`: The viewer's active language and key lookup
//! - `validator`: Acceptance rule for translation candidates
//! - `metrics`: Per-strategy translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use bilingual_recipes::i18n::{Language, LanguageContext};
//!
//! let amharic = Language::from_code("am")?;
//! assert_eq!(amharic.sibling(), Language::ENGLISH);
//!
//! let ctx = LanguageContext::new(amharic);
//! let label = ctx.t("recipe.unknownCategory");
//! ```

mod context;
mod language;
mod metrics;
mod registry;
mod strings;
mod validator;

pub use context::LanguageContext;
pub use language::Language;
pub use metrics::{MetricsReport, StrategyReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
pub use validator::{Rejection, TranslationValidator};
