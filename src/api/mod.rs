//! API Module
//!
//! HTTP handlers and routing for the product catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - Filtered, sorted, paged search
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Fetch one product
//! - `PUT /products/:id` - Replace a product
//! - `DELETE /products/:id` - Delete a product
//! - `POST /seed` - Bulk-create sample products
//! - `GET /cache/metrics` - Cache hit/miss snapshot
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
