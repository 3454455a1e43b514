//! Product Cache Module
//!
//! Cache-aside decorator over a `ProductStore`.
//!
//! Reads check the cache first and populate it on a miss. Writes go to the
//! inner store and, only when they succeed, invalidate the by-id entry they
//! touched plus every tracked search page. Search invalidation is coarse:
//! one product write can move that product into or out of any number
//! of cached filter/sort/page combinations.
//!
//! The tracking set expires twice `default_ttl` after its latest addition, so
//! it always outlives the newest page it lists and an idle set disappears.
//!
//! A search miss that read the store before a concurrent write finished can
//! still cache its page after that write's invalidation. Such a page is stale
//! for at most `default_ttl`; there is no coalescing or versioning.
//!
//! Cache failures never reach the caller. Inner store failures pass through
//! untouched and are never cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{CacheClient, CacheKeyBuilder, CacheStore, MetricsRecorder, MetricsSnapshot};
use crate::catalog::ProductStore;
use crate::config::CacheSettings;
use crate::error::Result;
use crate::models::{CreateProductRequest, Page, Product, SearchCriteria, UpdateProductRequest};

// == Product Cache ==
/// `ProductStore` decorator adding read-through caching.
pub struct ProductCache<S> {
    inner: S,
    cache: CacheClient,
    keys: CacheKeyBuilder,
    metrics: Arc<MetricsRecorder>,
    settings: CacheSettings,
}

impl<S: ProductStore> ProductCache<S> {
    // == Constructor ==
    /// Wraps `inner`, caching through `store` and counting into `metrics`.
    pub fn new(
        inner: S,
        store: Arc<dyn CacheStore>,
        metrics: Arc<MetricsRecorder>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            inner,
            cache: CacheClient::new(store),
            keys: CacheKeyBuilder::new(settings.key_prefix.clone()),
            metrics,
            settings,
        }
    }

    /// The undecorated store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Whether caching is active.
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Current hit/miss counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Expiry refreshed on the tracking set whenever a page is registered.
    fn tracking_ttl(&self) -> Duration {
        self.settings.default_ttl.saturating_mul(2)
    }

    // == Invalidation ==
    async fn invalidate_product(&self, id: i64) {
        let key = self.keys.qualify(&CacheKeyBuilder::by_id(id));
        self.cache.delete(&key).await;
        debug!(id, "Invalidated cached product");
    }

    /// Deletes every tracked search page. The tracking set itself stays and is
    /// refilled as new searches are cached.
    async fn invalidate_search_pages(&self) {
        let tracked = self.cache.set_members(&self.keys.tracking_set()).await;
        if tracked.is_empty() {
            return;
        }
        self.cache.delete_many(&tracked).await;
        debug!(count = tracked.len(), "Invalidated cached search pages");
    }
}

#[async_trait]
impl<S: ProductStore> ProductStore for ProductCache<S> {
    async fn get_by_id(&self, id: i64) -> Result<Product> {
        if !self.settings.enabled {
            return self.inner.get_by_id(id).await;
        }

        let key = CacheKeyBuilder::by_id(id);
        let stored_key = self.keys.qualify(&key);

        if let Some(product) = self.cache.get::<Product>(&stored_key).await {
            self.metrics.record_hit(&key);
            debug!(key = %key, "Cache hit");
            return Ok(product);
        }

        self.metrics.record_miss(&key);
        debug!(key = %key, "Cache miss");

        let product = self.inner.get_by_id(id).await?;
        self.cache
            .set(&stored_key, &product, Some(self.settings.default_ttl))
            .await;
        Ok(product)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Page<Product>> {
        if !self.settings.enabled {
            return self.inner.search(criteria).await;
        }

        let key = CacheKeyBuilder::paged(criteria);
        let stored_key = self.keys.qualify(&key);

        if let Some(page) = self.cache.get::<Page<Product>>(&stored_key).await {
            self.metrics.record_hit(&key);
            debug!(key = %key, "Cache hit");
            return Ok(page);
        }

        self.metrics.record_miss(&key);
        debug!(key = %key, "Cache miss");

        let page = self.inner.search(criteria).await?;

        // Track before storing: an untracked live page would survive invalidation
        if self
            .cache
            .add_to_set(
                &self.keys.tracking_set(),
                &stored_key,
                Some(self.tracking_ttl()),
            )
            .await
        {
            self.cache
                .set(&stored_key, &page, Some(self.settings.default_ttl))
                .await;
        }
        Ok(page)
    }

    async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        let product = self.inner.create(request).await?;
        if self.settings.enabled {
            self.invalidate_search_pages().await;
        }
        Ok(product)
    }

    async fn update(&self, id: i64, request: UpdateProductRequest) -> Result<Product> {
        let product = self.inner.update(id, request).await?;
        if self.settings.enabled {
            self.invalidate_product(id).await;
            self.invalidate_search_pages().await;
        }
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.delete(id).await?;
        if self.settings.enabled {
            self.invalidate_product(id).await;
            self.invalidate_search_pages().await;
        }
        Ok(())
    }

    async fn seed(&self, count: usize) -> Result<usize> {
        let created = self.inner.seed(count).await?;
        if self.settings.enabled {
            self.invalidate_search_pages().await;
        }
        Ok(created)
    }
}
