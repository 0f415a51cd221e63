//! View cache adapters.
//!
//! - `InMemoryViewCache` - single-process cache with per-entry TTL
//! - `RedisViewCache` - shared cache for multi-server deployments

mod in_memory;
mod redis;

pub use in_memory::InMemoryViewCache;
pub use self::redis::RedisViewCache;
