use crate::recipe::Recipe;
use crate::store::{RecipeStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::info;

const ID_PREFIX: &str = "recipe-";

/// In-process store used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<BTreeMap<u64, Recipe>>,
    next_id: AtomicU64,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }

    fn parse_id(id: &str) -> Result<u64, StoreError> {
        id.strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_where(&self, approved: bool) -> Vec<Recipe> {
        let recipes = self.recipes.read().await;
        // Newest first; later ids win ties on the timestamp
        let mut matching: Vec<(&u64, &Recipe)> = recipes
            .iter()
            .filter(|(_, r)| r.approved == approved)
            .collect();
        matching.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at.cmp(&a.created_at).then(b_id.cmp(a_id))
        });
        matching.into_iter().map(|(_, r)| r.clone()).collect()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn create(&self, mut recipe: Recipe) -> Result<String, StoreError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{}{}", ID_PREFIX, n);

        recipe.id = Some(id.clone());
        recipe.created_at.get_or_insert_with(Utc::now);
        self.recipes.write().await.insert(n, recipe);

        info!("Stored recipe {}", id);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        let n = Self::parse_id(id)?;
        self.recipes
            .read()
            .await
            .get(&n)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_approved(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.list_where(true).await)
    }

    async fn list_pending(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.list_where(false).await)
    }

    async fn approve(&self, id: &str, reviewed_at: DateTime<Utc>) -> Result<(), StoreError> {
        let n = Self::parse_id(id)?;
        let mut recipes = self.recipes.write().await;
        let recipe = recipes
            .get_mut(&n)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        recipe.approved = true;
        recipe.reviewed_at = Some(reviewed_at);
        info!("Approved recipe {}", id);
        Ok(())
    }

    async fn reject(&self, id: &str) -> Result<(), StoreError> {
        let n = Self::parse_id(id)?;
        self.recipes
            .write()
            .await
            .remove(&n)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        info!("Rejected and deleted recipe {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::LocalizedField;
    use chrono::{Duration, TimeZone};

    fn titled(title: &str) -> Recipe {
        Recipe {
            title: Some(LocalizedField::from(title)),
            ..Recipe::default()
        }
    }

    fn title_of(recipe: &Recipe) -> &str {
        match recipe.title.as_ref() {
            Some(LocalizedField::Plain(t)) => t,
            _ => "",
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_timestamp() {
        let store = MemoryRecipeStore::new();
        let a = store.create(titled("Shiro")).await.unwrap();
        let b = store.create(titled("Tibs")).await.unwrap();

        assert_eq!(a, "recipe-1");
        assert_eq!(b, "recipe-2");
        assert_eq!(store.len().await, 2);

        let stored = store.get(&a).await.unwrap();
        assert_eq!(stored.id.as_deref(), Some("recipe-1"));
        assert!(stored.created_at.is_some());
        assert!(!stored.approved);
    }

    #[tokio::test]
    async fn test_create_ignores_incoming_id_and_keeps_timestamp() {
        let store = MemoryRecipeStore::new();
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let recipe = Recipe {
            id: Some("forged".to_string()),
            created_at: Some(created),
            ..titled("Kitfo")
        };

        let id = store.create(recipe).await.unwrap();
        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.id.as_deref(), Some(id.as_str()));
        assert_eq!(stored.created_at, Some(created));
        assert!(matches!(store.get("forged").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let store = MemoryRecipeStore::new();
        for id in ["recipe-99", "nonsense", ""] {
            assert!(matches!(store.get(id).await, Err(StoreError::NotFound(_))));
            assert!(matches!(store.reject(id).await, Err(StoreError::NotFound(_))));
            assert!(matches!(
                store.approve(id, Utc::now()).await,
                Err(StoreError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_moderation_flow() {
        let store = MemoryRecipeStore::new();
        let first = store.create(titled("Shiro")).await.unwrap();
        let second = store.create(titled("Tibs")).await.unwrap();
        let third = store.create(titled("Kitfo")).await.unwrap();

        let pending = store.list_pending().await.unwrap();
        assert_eq!(pending.len(), 3);
        assert!(store.list_approved().await.unwrap().is_empty());

        let reviewed = Utc::now();
        store.approve(&first, reviewed).await.unwrap();
        store.reject(&second).await.unwrap();

        let approved = store.list_approved().await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].reviewed_at, Some(reviewed));
        assert!(approved[0].approved);

        let pending = store.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id.as_deref(), Some(third.as_str()));
        assert!(store.get(&second).await.is_err());
    }

    #[tokio::test]
    async fn test_lists_are_newest_first() {
        let store = MemoryRecipeStore::new();
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        for (title, offset) in [("Old", 0), ("Newest", 48), ("Middle", 24)] {
            let recipe = Recipe {
                created_at: Some(base + Duration::hours(offset)),
                ..titled(title)
            };
            store.create(recipe).await.unwrap();
        }
        // Same timestamp as "Newest" but created later
        store
            .create(Recipe {
                created_at: Some(base + Duration::hours(48)),
                ..titled("Tie")
            })
            .await
            .unwrap();

        let pending = store.list_pending().await.unwrap();
        let titles: Vec<&str> = pending.iter().map(title_of).collect();
        assert_eq!(titles, vec!["Tie", "Newest", "Middle", "Old"]);
    }
}
