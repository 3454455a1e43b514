//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Every product operation
//! goes through the shared `ProductStore`, which in a running server is the
//! caching decorator.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheStore, MetricsRecorder, MetricsSnapshot, ProductCache};
use crate::catalog::ProductStore;
use crate::config::CacheSettings;
use crate::error::{CatalogError, Result};
use crate::models::{
    CreateProductRequest, HealthResponse, Page, Product, SearchCriteria, SeedRequest,
    SeedResponse, UpdateProductRequest,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product store seen by handlers
    pub catalog: Arc<dyn ProductStore>,
    /// Counters fed by the product cache
    pub metrics: Arc<MetricsRecorder>,
    /// Whether the catalog is wrapped in an active cache
    pub cache_enabled: bool,
}

impl AppState {
    /// Creates a new AppState from already-built parts.
    pub fn new(
        catalog: Arc<dyn ProductStore>,
        metrics: Arc<MetricsRecorder>,
        cache_enabled: bool,
    ) -> Self {
        Self {
            catalog,
            metrics,
            cache_enabled,
        }
    }

    /// Wraps `inner` in a `ProductCache` over `backend`.
    pub fn with_cache<S: ProductStore + 'static>(
        inner: S,
        backend: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        let metrics = Arc::new(MetricsRecorder::new());
        let cache_enabled = settings.enabled;
        let catalog = ProductCache::new(inner, backend, metrics.clone(), settings);
        Self::new(Arc::new(catalog), metrics, cache_enabled)
    }
}

/// Handler for GET /products
pub async fn search_handler(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<Json<Page<Product>>> {
    // Reject before the cache so bad queries never count as misses
    if let Some(error_msg) = criteria.validate() {
        return Err(CatalogError::Validation(error_msg));
    }

    let page = state.catalog.search(&criteria).await?;
    Ok(Json(page))
}

/// Handler for GET /products/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = state.catalog.get_by_id(id).await?;
    Ok(Json(product))
}

/// Handler for POST /products
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /products/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let product = state.catalog.update(id, req).await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /seed
pub async fn seed_handler(
    State(state): State<AppState>,
    Json(req): Json<SeedRequest>,
) -> Result<Json<SeedResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CatalogError::Validation(error_msg));
    }

    let created = state.catalog.seed(req.count).await?;
    Ok(Json(SeedResponse::new(created)))
}

/// Handler for GET /cache/metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache_enabled))
}
