//! Catalog Module
//!
//! The `ProductStore` contract consumed by the cache layer, and an in-memory
//! implementation of it.

mod memory;

pub use memory::InMemoryProductStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateProductRequest, Page, Product, SearchCriteria, UpdateProductRequest};

// == Product Store ==
/// Source of truth for products.
///
/// `ProductCache` implements this trait as well, so a cached store can be used
/// anywhere an uncached one is expected.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Loads a single product, failing with `NotFound` when absent.
    async fn get_by_id(&self, id: i64) -> Result<Product>;

    /// Returns one page of products matching `criteria`.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Page<Product>>;

    /// Creates a product and returns it with its assigned id.
    async fn create(&self, request: CreateProductRequest) -> Result<Product>;

    /// Replaces the mutable fields of an existing product.
    async fn update(&self, id: i64, request: UpdateProductRequest) -> Result<Product>;

    /// Removes a product.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Bulk-creates `count` generated products, returning how many were created.
    async fn seed(&self, count: usize) -> Result<usize>;
}

#[async_trait]
impl<T: ProductStore + ?Sized> ProductStore for std::sync::Arc<T> {
    async fn get_by_id(&self, id: i64) -> Result<Product> {
        (**self).get_by_id(id).await
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Page<Product>> {
        (**self).search(criteria).await
    }

    async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        (**self).create(request).await
    }

    async fn update(&self, id: i64, request: UpdateProductRequest) -> Result<Product> {
        (**self).update(id, request).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        (**self).delete(id).await
    }

    async fn seed(&self, count: usize) -> Result<usize> {
        (**self).seed(count).await
    }
}
