//! Error types for the product catalog and its cache layer
//!
//! `CatalogError` carries business failures from the product store and is the
//! only error a caller of `ProductStore` ever sees. `CacheStoreError` is raised
//! by cache backends and is absorbed by `CacheClient` before it reaches a caller.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Business failures returned by a product store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No product with the given id
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Request data failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unexpected failure inside the store
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Cache Store Error Enum ==
/// Failures raised by a cache backend.
#[derive(Error, Debug)]
pub enum CacheStoreError {
    /// Backend could not be reached
    #[error("Cache connection error: {0}")]
    Connection(String),

    /// Backend rejected or failed a command
    #[error("Cache command error: {0}")]
    Command(String),

    /// Backend did not answer within the operation timeout
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<redis::RedisError> for CacheStoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
            CacheStoreError::Connection(err.to_string())
        } else {
            CacheStoreError::Command(err.to_string())
        }
    }
}

// == Result Type Aliases ==
/// Convenience Result type for product store operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type returned by cache backends.
pub type CacheResult<T> = std::result::Result<T, CacheStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = CatalogError::NotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = CatalogError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = CatalogError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CatalogError::NotFound(3).to_string(), "Product not found: 3");
        let timeout = CacheStoreError::Timeout(Duration::from_millis(500));
        assert!(timeout.to_string().contains("500ms"));
    }
}
