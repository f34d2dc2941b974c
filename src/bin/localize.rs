//! Print a stored recipe as seen by a viewer in one language.
//!
//! Usage:
//!   localize <recipe.json> [en|am]
//!
//! The language defaults to APP_LOCALE (or English). Missing titles and
//! categories show the viewer-language placeholders used in list views.

use anyhow::{Context, Result};
use bilingual_recipes::config::Config;
use bilingual_recipes::i18n::{Language, LanguageContext};
use bilingual_recipes::normalize::{normalize_with, ViewDefaults};
use bilingual_recipes::recipe::{read_json_file, Recipe};

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilingual_recipes=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("Usage: localize <recipe.json> [en|am]")?;

    let language = match args.next() {
        Some(code) => Language::from_code(&code)?,
        None => Config::from_env()?.default_locale,
    };

    let recipe: Recipe = read_json_file(&path)?;
    let defaults = ViewDefaults::localized(&LanguageContext::new(language));
    let view = normalize_with(&recipe, language, &defaults);

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
