//! Cache Store Module
//!
//! The backend contract shared by the Redis, in-memory and no-op stores.
//! Keys are plain strings and values are JSON text; typed access and the
//! fail-open policy live in `CacheClient`.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheResult;

// == Cache Store ==
/// Key/value operations plus a string-set primitive for tracking keys.
///
/// Implementations must be safe to share across concurrent requests.
/// Deleting an absent key and reading an absent set are not errors.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetches the raw value stored under `key`.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl` when given.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()>;

    /// Removes `key`.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Removes every key in `keys`.
    async fn delete_many(&self, keys: &[String]) -> CacheResult<()>;

    /// Adds `member` to the set stored under `set_key`.
    ///
    /// When `ttl` is given the whole set expires that long from now, replacing
    /// any earlier expiry. Without it the current expiry is left as is.
    async fn add_to_set(&self, set_key: &str, member: &str, ttl: Option<Duration>)
        -> CacheResult<()>;

    /// Lists the members of the set stored under `set_key`.
    async fn set_members(&self, set_key: &str) -> CacheResult<Vec<String>>;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;
}
