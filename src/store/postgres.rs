use crate::recipe::Recipe;
use crate::store::{RecipeStore, StoreError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

/// Recipes in PostgreSQL.
///
/// The record is kept as a JSON document. Moderation state and timestamps
/// live in their own columns so listing can filter and sort in SQL; on read
/// the columns are written back over the document.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: PgPool,
}

impl PgRecipeStore {
    /// Connect and create the table if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        let store = Self::from_pool(pool);
        store
            .migrate()
            .await
            .context("Failed to create recipes table")?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS recipes (
                id BIGSERIAL PRIMARY KEY,
                document TEXT NOT NULL,
                approved BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL,
                reviewed_at TIMESTAMPTZ
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS recipes_approved_created_at
             ON recipes (approved, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Ids are decimal row keys; anything else cannot exist.
    fn parse_id(id: &str) -> Result<i64, StoreError> {
        id.parse().map_err(|_| StoreError::NotFound(id.to_string()))
    }

    fn from_row(row: &PgRow) -> Result<Recipe, StoreError> {
        let id: i64 = row.try_get("id")?;
        let document: String = row.try_get("document")?;

        let mut recipe: Recipe = serde_json::from_str(&document)?;
        recipe.id = Some(id.to_string());
        recipe.approved = row.try_get("approved")?;
        recipe.created_at = Some(row.try_get("created_at")?);
        recipe.reviewed_at = row.try_get("reviewed_at")?;
        Ok(recipe)
    }

    async fn list_where(&self, approved: bool) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, document, approved, created_at, reviewed_at
             FROM recipes
             WHERE approved = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(approved)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn create(&self, mut recipe: Recipe) -> Result<String, StoreError> {
        recipe.id = None;
        let created_at = *recipe.created_at.get_or_insert_with(Utc::now);
        let document = serde_json::to_string(&recipe)?;

        let row = sqlx::query(
            "INSERT INTO recipes (document, approved, created_at, reviewed_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&document)
        .bind(recipe.approved)
        .bind(created_at)
        .bind(recipe.reviewed_at)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        info!("Stored recipe {}", id);
        Ok(id.to_string())
    }

    async fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        let key = Self::parse_id(id)?;
        let row = sqlx::query(
            "SELECT id, document, approved, created_at, reviewed_at
             FROM recipes WHERE id = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Self::from_row(&row)
    }

    async fn list_approved(&self) -> Result<Vec<Recipe>, StoreError> {
        self.list_where(true).await
    }

    async fn list_pending(&self) -> Result<Vec<Recipe>, StoreError> {
        self.list_where(false).await
    }

    async fn approve(&self, id: &str, reviewed_at: DateTime<Utc>) -> Result<(), StoreError> {
        let key = Self::parse_id(id)?;
        let result = sqlx::query(
            "UPDATE recipes SET approved = TRUE, reviewed_at = $2 WHERE id = $1",
        )
        .bind(key)
        .bind(reviewed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!("Approved recipe {}", id);
        Ok(())
    }

    async fn reject(&self, id: &str) -> Result<(), StoreError> {
        let key = Self::parse_id(id)?;
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!("Rejected and deleted recipe {}", id);
        Ok(())
    }
}
