//! Redis-backed view cache for multi-server deployments.
//!
//! Each page is one hash, `moodwrap:view:{path}`, with a field per user.
//! Field values carry their own expiry so one busy user cannot keep a stale
//! entry for another alive. The page generation lives in
//! `moodwrap:view-gen:{path}`; invalidating deletes the hash and bumps it in
//! one transaction, and reads ignore fields stored under an older generation.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{CacheError, ViewCache, ViewPath};

#[derive(Debug, Serialize, Deserialize)]
struct StoredView {
    generation: u64,
    expires_at: Timestamp,
    view: serde_json::Value,
}

impl StoredView {
    fn is_fresh(&self, current_generation: u64, now: &Timestamp) -> bool {
        self.generation == current_generation && self.expires_at.is_after(now)
    }
}

#[derive(Clone)]
pub struct RedisViewCache {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisViewCache {
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    /// Connects to the given Redis URL.
    pub async fn connect(url: &str, ttl_secs: u64) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(Self::new(conn, ttl_secs))
    }
}

fn page_key(path: ViewPath) -> String {
    format!("moodwrap:view:{}", path.as_str())
}

fn generation_key(path: ViewPath) -> String {
    format!("moodwrap:view-gen:{}", path.as_str())
}

fn unavailable(e: redis::RedisError) -> CacheError {
    CacheError::Unavailable(e.to_string())
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn get(
        &self,
        path: ViewPath,
        user_id: &UserId,
    ) -> Result<Option<serde_json::Value>, CacheError> {
        let mut conn = self.conn.clone();
        let (raw, generation): (Option<String>, Option<u64>) = redis::pipe()
            .hget(page_key(path), user_id.as_str())
            .get(generation_key(path))
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        let stored: StoredView =
            serde_json::from_str(&raw).map_err(|e| CacheError::Corrupt(e.to_string()))?;

        Ok(stored
            .is_fresh(generation.unwrap_or(0), &Timestamp::now())
            .then_some(stored.view))
    }

    async fn generation(&self, path: ViewPath) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let generation: Option<u64> = conn
            .get(generation_key(path))
            .await
            .map_err(unavailable)?;
        Ok(generation.unwrap_or(0))
    }

    async fn put(
        &self,
        path: ViewPath,
        user_id: &UserId,
        view: serde_json::Value,
        generation: u64,
    ) -> Result<(), CacheError> {
        let stored = StoredView {
            generation,
            expires_at: Timestamp::now().plus_secs(self.ttl_secs),
            view,
        };
        let raw =
            serde_json::to_string(&stored).map_err(|e| CacheError::Corrupt(e.to_string()))?;

        let key = page_key(path);
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(&key, user_id.as_str(), raw)
            .await
            .map_err(unavailable)?;
        // hash expiry follows the newest field
        conn.expire::<_, ()>(&key, self.ttl_secs as i64)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn invalidate(&self, path: ViewPath) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .del(page_key(path))
            .ignore()
            .incr(generation_key(path), 1)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keys_are_namespaced_by_path() {
        assert_eq!(page_key(ViewPath::CheckIn), "moodwrap:view:/check-in");
        assert_eq!(page_key(ViewPath::Analytics), "moodwrap:view:/analytics");
    }

    #[test]
    fn stored_view_round_trips() {
        let stored = StoredView {
            generation: 4,
            expires_at: Timestamp::now(),
            view: serde_json::json!({ "totalCheckIns": 3 }),
        };
        let raw = serde_json::to_string(&stored).unwrap();
        let back: StoredView = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.generation, 4);
        assert_eq!(back.view["totalCheckIns"], 3);
    }

    #[test]
    fn views_from_an_older_generation_are_stale() {
        let now = Timestamp::now();
        let stored = StoredView {
            generation: 2,
            expires_at: now.plus_secs(60),
            view: serde_json::json!(null),
        };

        assert!(stored.is_fresh(2, &now));
        assert!(!stored.is_fresh(3, &now));
        assert!(!stored.is_fresh(2, &now.plus_secs(61)));
    }

    #[test]
    fn generation_keys_are_separate_from_pages() {
        assert_eq!(generation_key(ViewPath::Profile), "moodwrap:view-gen:/profile");
        assert_ne!(generation_key(ViewPath::Profile), page_key(ViewPath::Profile));
    }
}
