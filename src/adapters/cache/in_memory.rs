//! In-memory view cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{CacheError, ViewCache, ViewPath};

struct Entry {
    view: serde_json::Value,
    expires_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<(ViewPath, UserId), Entry>,
    generations: HashMap<ViewPath, u64>,
}

impl CacheState {
    fn generation(&self, path: ViewPath) -> u64 {
        self.generations.get(&path).copied().unwrap_or(0)
    }
}

/// Process-local cache keyed by page and user.
pub struct InMemoryViewCache {
    state: RwLock<CacheState>,
    ttl: Duration,
}

impl InMemoryViewCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            ttl,
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn get(
        &self,
        path: ViewPath,
        user_id: &UserId,
    ) -> Result<Option<serde_json::Value>, CacheError> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .get(&(path, user_id.clone()))
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.view.clone()))
    }

    async fn generation(&self, path: ViewPath) -> Result<u64, CacheError> {
        Ok(self.state.read().await.generation(path))
    }

    async fn put(
        &self,
        path: ViewPath,
        user_id: &UserId,
        view: serde_json::Value,
        generation: u64,
    ) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        if state.generation(path) != generation {
            tracing::debug!(path = %path, user_id = %user_id, "dropping view built before invalidation");
            return Ok(());
        }

        let now = Instant::now();
        let Some(expires_at) = now.checked_add(self.ttl) else {
            return Ok(());
        };
        state.entries.retain(|_, e| e.expires_at > now);
        state
            .entries
            .insert((path, user_id.clone()), Entry { view, expires_at });
        Ok(())
    }

    async fn invalidate(&self, path: ViewPath) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.entries.retain(|(p, _), _| *p != path);
        *state.generations.entry(path).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    async fn put_current(cache: &InMemoryViewCache, path: ViewPath, user: &str, view: serde_json::Value) {
        let generation = cache.generation(path).await.unwrap();
        cache.put(path, &uid(user), view, generation).await.unwrap();
    }

    #[tokio::test]
    async fn stores_per_user_and_path() {
        let cache = InMemoryViewCache::new(Duration::from_secs(60));
        put_current(&cache, ViewPath::Profile, "u1", json!({"n": 1})).await;

        assert_eq!(
            cache.get(ViewPath::Profile, &uid("u1")).await.unwrap(),
            Some(json!({"n": 1}))
        );
        assert!(cache.get(ViewPath::Profile, &uid("u2")).await.unwrap().is_none());
        assert!(cache.get(ViewPath::Analytics, &uid("u1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalidate_drops_path_for_all_users() {
        let cache = InMemoryViewCache::new(Duration::from_secs(60));
        put_current(&cache, ViewPath::Analytics, "u1", json!(1)).await;
        put_current(&cache, ViewPath::Analytics, "u2", json!(2)).await;
        put_current(&cache, ViewPath::CheckIn, "u1", json!(3)).await;

        cache.invalidate(ViewPath::Analytics).await.unwrap();

        assert!(cache.get(ViewPath::Analytics, &uid("u1")).await.unwrap().is_none());
        assert!(cache.get(ViewPath::Analytics, &uid("u2")).await.unwrap().is_none());
        assert!(cache.get(ViewPath::CheckIn, &uid("u1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn view_built_before_invalidation_is_not_stored() {
        let cache = InMemoryViewCache::new(Duration::from_secs(60));
        let before = cache.generation(ViewPath::Analytics).await.unwrap();

        cache.invalidate(ViewPath::Analytics).await.unwrap();
        cache
            .put(ViewPath::Analytics, &uid("u1"), json!("stale"), before)
            .await
            .unwrap();

        assert!(cache.get(ViewPath::Analytics, &uid("u1")).await.unwrap().is_none());
        assert_eq!(cache.generation(ViewPath::Analytics).await.unwrap(), before + 1);
        assert_eq!(cache.generation(ViewPath::Profile).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let cache = InMemoryViewCache::new(Duration::ZERO);
        put_current(&cache, ViewPath::Profile, "u1", json!(1)).await;
        assert!(cache.get(ViewPath::Profile, &uid("u1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unrepresentable_ttl_skips_storing() {
        let cache = InMemoryViewCache::new(Duration::MAX);
        put_current(&cache, ViewPath::Profile, "u1", json!(1)).await;
        assert_eq!(cache.len().await, 0);
    }
}
