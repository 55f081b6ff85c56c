//! In-memory cache of the work-item list
//!
//! There is exactly one list to cache, so the cache is a single slot under
//! a fixed key. Mutation paths call [`WorkCache::invalidate`], which forces
//! the next read to refetch from the server.

use anyhow::Result;
use common::model::Work;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::ApiClient;

/// Cache key for the work-item list
pub const WORKS_CACHE_KEY: &str = "works";

/// Single-slot cache of the last successfully fetched work list
#[derive(Debug, Default)]
pub struct WorkCache {
    entry: RwLock<Option<Vec<Work>>>,
}

impl WorkCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached list, if any
    pub async fn get(&self) -> Option<Vec<Work>> {
        self.entry.read().await.clone()
    }

    /// Replace the cached list
    pub async fn set(&self, works: Vec<Work>) {
        *self.entry.write().await = Some(works);
    }

    /// Drop the cached list, forcing the next read to refetch
    pub async fn invalidate(&self) {
        debug!("Invalidating cache key: {}", WORKS_CACHE_KEY);
        *self.entry.write().await = None;
    }

    /// Return the cached list, fetching from the server on a cold slot
    pub async fn get_or_refresh(&self, client: &ApiClient) -> Result<Vec<Work>> {
        if let Some(works) = self.get().await {
            return Ok(works);
        }

        let works = client.fetch_works().await?;
        self.set(works.clone()).await;
        Ok(works)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::WorkStatus;
    use uuid::Uuid;

    fn sample_work() -> Work {
        Work {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: None,
            status: WorkStatus::Todo,
            end_date: None,
            created_at: Utc::now(),
            owner_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_empty_cache_returns_none() {
        let cache = WorkCache::new();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = WorkCache::new();
        let work = sample_work();
        cache.set(vec![work.clone()]).await;

        let cached = cache.get().await.expect("cache should be warm");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, work.id);
    }

    #[tokio::test]
    async fn test_invalidate_empties_the_slot() {
        let cache = WorkCache::new();
        cache.set(vec![sample_work()]).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
