//! Redis Cache Store
//!
//! Remote backend speaking plain Redis commands over a shared
//! `ConnectionManager`: `GET`, `SET key value PX ms`, `DEL`, `SADD` + `PEXPIRE`,
//! `SMEMBERS`.
//! Every command is bounded by the configured operation timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::info;

use crate::cache::CacheStore;
use crate::error::{CacheResult, CacheStoreError};

// == Redis Cache Store ==
/// Cache backend backed by a Redis-compatible server.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
    operation_timeout: Duration,
}

impl RedisCacheStore {
    // == Connect ==
    /// Opens a managed connection to `url`.
    ///
    /// Fails if the URL is invalid or the server cannot be reached within
    /// `operation_timeout`.
    pub async fn connect(url: &str, operation_timeout: Duration) -> CacheResult<Self> {
        let client = Client::open(url)?;
        let conn = tokio::time::timeout(operation_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheStoreError::Timeout(operation_timeout))??;

        info!(url, "Connected to Redis cache backend");
        Ok(Self {
            conn,
            operation_timeout,
        })
    }

    async fn bounded<T, F>(&self, command: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.operation_timeout, command).await {
            Ok(result) => result.map_err(CacheStoreError::from),
            Err(_) => Err(CacheStoreError::Timeout(self.operation_timeout)),
        }
    }
}

// PX and PEXPIRE reject zero, so sub-millisecond TTLs round up
fn millis(ttl: Duration) -> u64 {
    ttl.as_millis().clamp(1, u64::MAX as u128) as u64
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.get(key).await }).await
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("PX").arg(millis(ttl));
        }
        self.bounded(async move { cmd.query_async::<_, ()>(&mut conn).await })
            .await
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.del::<_, ()>(key).await }).await
    }

    async fn delete_many(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let keys = keys.to_vec();
        self.bounded(async move { conn.del::<_, ()>(keys).await }).await
    }

    async fn add_to_set(
        &self,
        set_key: &str,
        member: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic().cmd("SADD").arg(set_key).arg(member).ignore();
        if let Some(ttl) = ttl {
            pipe.cmd("PEXPIRE").arg(set_key).arg(millis(ttl)).ignore();
        }
        self.bounded(async move { pipe.query_async::<_, ()>(&mut conn).await })
            .await
    }

    async fn set_members(&self, set_key: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.smembers(set_key).await }).await
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_never_zero() {
        assert_eq!(millis(Duration::ZERO), 1);
        assert_eq!(millis(Duration::from_micros(300)), 1);
        assert_eq!(millis(Duration::from_secs(2)), 2000);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisCacheStore::connect("not-a-redis-url", Duration::from_millis(100)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_unreachable_server_fails() {
        // Port 1 is reserved and never runs Redis
        let result =
            RedisCacheStore::connect("redis://127.0.0.1:1/", Duration::from_millis(200)).await;
        assert!(result.is_err());
    }
}
