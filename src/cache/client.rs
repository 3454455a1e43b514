//! Cache Client Module
//!
//! Typed, fail-open access to a `CacheStore`. Every backend error and every
//! serialization error is logged at warn level and degraded: reads become
//! misses, writes become no-ops. Nothing here returns an error.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::cache::CacheStore;

// == Cache Client ==
/// Fail-open wrapper shared by everything that talks to the cache backend.
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
}

impl CacheClient {
    // == Constructor ==
    /// Wraps a backend.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    // == Get ==
    /// Reads and deserializes `key`.
    ///
    /// Returns None when the key is absent, the backend fails, or the stored
    /// JSON does not decode as `T`. Undecodable entries are removed.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(
                    key,
                    backend = self.backend_name(),
                    error = %error,
                    "Cache read failed, treating as miss"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(
                    key,
                    error = %error,
                    "Cached entry could not be decoded, treating as miss"
                );
                self.delete(key).await;
                None
            }
        }
    }

    // == Set ==
    /// Serializes and stores `value`. Returns true if the backend accepted it.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key, error = %error, "Failed to serialize value for cache");
                return false;
            }
        };

        match self.store.set(key, raw, ttl).await {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    key,
                    backend = self.backend_name(),
                    error = %error,
                    "Cache write failed, skipping"
                );
                false
            }
        }
    }

    // == Delete ==
    /// Removes `key`, ignoring failures.
    pub async fn delete(&self, key: &str) {
        if let Err(error) = self.store.delete(key).await {
            warn!(
                key,
                backend = self.backend_name(),
                error = %error,
                "Cache delete failed"
            );
        }
    }

    // == Delete Many ==
    /// Removes every key in `keys`, ignoring failures. Empty input is a no-op.
    pub async fn delete_many(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        if let Err(error) = self.store.delete_many(keys).await {
            warn!(
                count = keys.len(),
                backend = self.backend_name(),
                error = %error,
                "Cache bulk delete failed"
            );
        }
    }

    // == Add To Set ==
    /// Adds `member` to `set_key`, refreshing the set's expiry to `ttl`.
    /// Returns true if the backend accepted it.
    pub async fn add_to_set(&self, set_key: &str, member: &str, ttl: Option<Duration>) -> bool {
        match self.store.add_to_set(set_key, member, ttl).await {
            Ok(()) => true,
            Err(error) => {
                warn!(
                    set_key,
                    member,
                    backend = self.backend_name(),
                    error = %error,
                    "Cache set add failed"
                );
                false
            }
        }
    }

    // == Set Members ==
    /// Lists members of `set_key`; empty on absence or failure.
    pub async fn set_members(&self, set_key: &str) -> Vec<String> {
        match self.store.set_members(set_key).await {
            Ok(members) => members,
            Err(error) => {
                warn!(
                    set_key,
                    backend = self.backend_name(),
                    error = %error,
                    "Cache set read failed"
                );
                Vec::new()
            }
        }
    }
}
