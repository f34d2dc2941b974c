//! Persisted-record store.
//!
//! A submission is written exactly once, after translation has settled.
//! The only later writes are moderation actions.

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use crate::recipe::Recipe;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to encode or decode recipe document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("recipe not found: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a new recipe and return its assigned id.
    ///
    /// Any id already on `recipe` is ignored. `createdAt` is set to now
    /// when missing.
    async fn create(&self, recipe: Recipe) -> Result<String, StoreError>;

    async fn get(&self, id: &str) -> Result<Recipe, StoreError>;

    /// Approved recipes, newest first.
    async fn list_approved(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Recipes awaiting moderation, newest first.
    async fn list_pending(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Mark a recipe approved and record when it was reviewed.
    async fn approve(&self, id: &str, reviewed_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Delete a rejected recipe.
    async fn reject(&self, id: &str) -> Result<(), StoreError>;
}
