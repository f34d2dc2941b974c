//! Submit a recipe draft: translate it, store it, print the receipt.
//!
//! Usage:
//!   bilingual-recipes <draft.json>
//!
//! Stores in PostgreSQL when DATABASE_URL is set, otherwise in memory
//! (useful for trying out translation settings).

use anyhow::{Context, Result};
use bilingual_recipes::config::Config;
use bilingual_recipes::i18n::LanguageContext;
use bilingual_recipes::pipeline::TranslationPipeline;
use bilingual_recipes::recipe::{read_json_file, RecipeDraft};
use bilingual_recipes::store::{MemoryRecipeStore, PgRecipeStore, RecipeStore};
use bilingual_recipes::submission::submit_recipe;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilingual_recipes=info".parse()?),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: bilingual-recipes <draft.json>")?;

    let config = Config::from_env()?;
    info!("Starting recipe submission ({})", config.environment);

    let draft: RecipeDraft = read_json_file(&path)?;

    let store: Box<dyn RecipeStore> = match config.database_url.as_deref() {
        Some(url) => Box::new(PgRecipeStore::connect(url).await?),
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            Box::new(MemoryRecipeStore::new())
        }
    };

    let pipeline = TranslationPipeline::from_config(&config)?;
    let ctx = LanguageContext::new(config.default_locale);

    match submit_recipe(&pipeline, store.as_ref(), &draft, &ctx).await {
        Ok(receipt) => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
            info!("{}", receipt.message);
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            eprintln!("{}", e.user_message(&ctx));
            return Err(e.into());
        }
    }

    let metrics = pipeline.metrics().report();
    info!(
        "Translation metrics: {}",
        serde_json::to_string(&metrics).context("Failed to serialize metrics")?
    );

    Ok(())
}
