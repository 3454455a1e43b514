//! Cache Module
//!
//! Read-through caching for product reads: key derivation, pluggable
//! backends, fail-open typed access, hit/miss metrics and the `ProductCache`
//! decorator tying them together.

mod client;
mod entry;
pub mod keys;
mod memory;
mod metrics;
mod noop;
mod product_cache;
mod redis_store;
mod store;


// Re-export public types
pub use client::CacheClient;
pub use entry::CacheEntry;
pub use keys::CacheKeyBuilder;
pub use memory::MemoryCacheStore;
pub use metrics::{MetricsRecorder, MetricsSnapshot};
pub use noop::NoopCacheStore;
pub use product_cache::ProductCache;
pub use redis_store::RedisCacheStore;
pub use store::CacheStore;
