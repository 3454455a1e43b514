//! In-Memory Cache Store
//!
//! LRU-bounded value storage with per-entry TTL, plus string sets that expire
//! as a whole. Expired values and sets are dropped lazily on read and in bulk
//! by the cleanup task.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStore};
use crate::error::CacheResult;

// == Tracked Set ==
#[derive(Debug, Default)]
struct TrackedSet {
    members: HashSet<String>,
    expires_at: Option<Instant>,
}

impl TrackedSet {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

// == Memory State ==
struct MemoryState {
    entries: LruCache<String, CacheEntry>,
    sets: HashMap<String, TrackedSet>,
    evictions: u64,
}

impl MemoryState {
    fn insert(&mut self, key: &str, value: String, ttl: Option<Duration>) {
        let replaced = self.entries.push(key.to_string(), CacheEntry::new(value, ttl));

        // push hands back either the old value for this key or the evicted LRU entry
        if let Some((evicted_key, _)) = replaced {
            if evicted_key != key {
                self.evictions += 1;
                debug!(key = %evicted_key, "Evicted least recently used entry");
            }
        }
    }

    fn read(&mut self, key: &str) -> Option<String> {
        if self.entries.peek(key)?.is_expired() {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn add_member(&mut self, set_key: &str, member: &str, ttl: Option<Duration>) {
        let set = self.sets.entry(set_key.to_string()).or_default();
        if set.is_expired() {
            *set = TrackedSet::default();
        }
        set.members.insert(member.to_string());
        if let Some(ttl) = ttl {
            set.expires_at = Some(Instant::now() + ttl);
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.pop(key);
        self.sets.remove(key);
    }
}

// == Memory Cache Store ==
/// In-process cache backend.
pub struct MemoryCacheStore {
    state: RwLock<MemoryState>,
}

impl MemoryCacheStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` values (sets excluded).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: RwLock::new(MemoryState {
                entries: LruCache::new(capacity),
                sets: HashMap::new(),
                evictions: 0,
            }),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired values and sets, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut state = self.state.write().await;
        let expired_keys: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            state.entries.pop(key);
        }

        let sets_before = state.sets.len();
        state.sets.retain(|_, set| !set.is_expired());

        expired_keys.len() + (sets_before - state.sets.len())
    }

    /// Number of stored values, expired or not.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// Number of stored sets, expired or not.
    pub async fn set_count(&self) -> usize {
        self.state.read().await.sets.len()
    }

    /// Entries dropped to stay under capacity since creation.
    pub async fn evictions(&self) -> u64 {
        self.state.read().await.evictions
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        // Write lock: reads update LRU order and may drop an expired entry
        Ok(self.state.write().await.read(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        self.state.write().await.insert(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.state.write().await.remove(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> CacheResult<()> {
        let mut state = self.state.write().await;
        for key in keys {
            state.remove(key);
        }
        Ok(())
    }

    async fn add_to_set(
        &self,
        set_key: &str,
        member: &str,
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.state.write().await.add_member(set_key, member, ttl);
        Ok(())
    }

    async fn set_members(&self, set_key: &str) -> CacheResult<Vec<String>> {
        let state = self.state.read().await;
        let mut members: Vec<String> = match state.sets.get(set_key) {
            Some(set) if !set.is_expired() => set.members.iter().cloned().collect(),
            _ => Vec::new(),
        };
        members.sort();
        Ok(members)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
