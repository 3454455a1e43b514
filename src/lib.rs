//! Product Cache - read-through caching for a product catalog
//!
//! Wraps a product store with cache-aside reads, write-path invalidation and
//! hit/miss metrics, over Redis, in-memory or no-op cache backends.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheKeyBuilder, CacheStore, MetricsRecorder, ProductCache};
pub use catalog::{InMemoryProductStore, ProductStore};
pub use config::{CacheSettings, Config};
pub use tasks::spawn_cleanup_task;
