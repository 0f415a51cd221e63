//! Read-through helper for cached page views.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ViewCache, ViewPath};

/// Returns the cached rendering of `path` for `user_id`, or builds, stores,
/// and returns a fresh one.
///
/// Cache faults never fail the request; they are logged and the view is
/// built from storage.
pub(crate) async fn read_through<T, F, Fut>(
    cache: &dyn ViewCache,
    path: ViewPath,
    user_id: &UserId,
    build: F,
) -> Result<T, DomainError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    match cache.get(path, user_id).await {
        Ok(Some(json)) => match serde_json::from_value(json) {
            Ok(view) => {
                tracing::debug!(path = %path, user_id = %user_id, "view cache hit");
                return Ok(view);
            }
            Err(e) => tracing::warn!(path = %path, error = %e, "discarding unreadable cached view"),
        },
        Ok(None) => tracing::debug!(path = %path, user_id = %user_id, "view cache miss"),
        Err(e) => tracing::warn!(path = %path, error = %e, "view cache unavailable"),
    }

    // Read before building: an invalidation during the build outdates it.
    let generation = match cache.generation(path).await {
        Ok(generation) => Some(generation),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "view generation unavailable");
            None
        }
    };

    let view = build().await?;

    let Some(generation) = generation else {
        return Ok(view);
    };
    match serde_json::to_value(&view) {
        Ok(json) => {
            if let Err(e) = cache.put(path, user_id, json, generation).await {
                tracing::warn!(path = %path, error = %e, "failed to store view");
            }
        }
        Err(e) => tracing::warn!(path = %path, error = %e, "failed to serialize view"),
    }

    Ok(view)
}
