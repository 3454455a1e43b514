//! Data models for the product catalog
//!
//! Domain records, search criteria, paging and the HTTP request/response DTOs.

pub mod product;
pub mod requests;
pub mod responses;
pub mod search;

// Re-export commonly used types
pub use product::Product;
pub use requests::{CreateProductRequest, SeedRequest, UpdateProductRequest};
pub use responses::{ErrorResponse, HealthResponse, SeedResponse};
pub use search::{Page, SearchCriteria, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
