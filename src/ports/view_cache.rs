//! ViewCache port - cached per-user renderings of the personal pages.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Pages whose rendering is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPath {
    CheckIn,
    Analytics,
    Profile,
}

impl ViewPath {
    /// Every page a new check-in makes stale.
    pub const AFTER_CHECK_IN: [ViewPath; 3] =
        [ViewPath::CheckIn, ViewPath::Analytics, ViewPath::Profile];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPath::CheckIn => "/check-in",
            ViewPath::Analytics => "/analytics",
            ViewPath::Profile => "/profile",
        }
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Cached entry is corrupt: {0}")]
    Corrupt(String),
}

impl From<CacheError> for DomainError {
    fn from(err: CacheError) -> Self {
        DomainError::new(ErrorCode::CacheError, err.to_string())
    }
}

/// Per-user page cache.
///
/// Each path has a generation that every invalidation moves forward. A
/// view is stored against the generation read before it was built, and a
/// view stored against an older generation is never returned.
#[async_trait]
pub trait ViewCache: Send + Sync {
    async fn get(
        &self,
        path: ViewPath,
        user_id: &UserId,
    ) -> Result<Option<serde_json::Value>, CacheError>;

    /// Current generation of `path`.
    async fn generation(&self, path: ViewPath) -> Result<u64, CacheError>;

    /// Stores a view built from data read after `generation` was observed.
    async fn put(
        &self,
        path: ViewPath,
        user_id: &UserId,
        view: serde_json::Value,
        generation: u64,
    ) -> Result<(), CacheError>;

    /// Drops the cached rendering of `path` for every user.
    async fn invalidate(&self, path: ViewPath) -> Result<(), CacheError>;
}
