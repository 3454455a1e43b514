//! No-op Cache Store
//!
//! Stand-in backend for when caching is switched off or the real backend is
//! unreachable at startup.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::CacheStore;
use crate::error::CacheResult;

/// Backend that stores nothing: reads miss, writes return immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCacheStore;

#[async_trait]
impl CacheStore for NoopCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn delete_many(&self, _keys: &[String]) -> CacheResult<()> {
        Ok(())
    }

    async fn add_to_set(
        &self,
        _set_key: &str,
        _member: &str,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn set_members(&self, _set_key: &str) -> CacheResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn backend_name(&self) -> &'static str {
        "noop"
    }
}
