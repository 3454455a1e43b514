//! Cache Key Module
//!
//! Deterministic key derivation for by-id lookups and paged searches.
//!
//! Key shapes:
//! - `product:by-id:{id}`
//! - `product:paged:{sha256-hex}` over the canonical search signature
//! - `product:paged:index` is the tracking set of live paged keys
//!
//! When a prefix is configured, `qualify` prepends `{prefix}:` to every key
//! written to the backend. Set members are stored already qualified.

use sha2::{Digest, Sha256};

use crate::models::SearchCriteria;

// == Key Constants ==
/// Leading segments of every by-id key
pub const BY_ID_PATTERN: &str = "product:by-id";

/// Leading segments of every paged-search key
pub const PAGED_PATTERN: &str = "product:paged";

/// Tracking set holding every cached paged key
pub const PAGED_INDEX_KEY: &str = "product:paged:index";

// == Cache Key Builder ==
/// Builds backend keys, applying an optional namespace prefix.
#[derive(Debug, Clone, Default)]
pub struct CacheKeyBuilder {
    prefix: Option<String>,
}

impl CacheKeyBuilder {
    // == Constructor ==
    /// Creates a builder. Blank prefixes are ignored.
    pub fn new(prefix: Option<String>) -> Self {
        let prefix = prefix
            .map(|p| p.trim().trim_end_matches(':').to_string())
            .filter(|p| !p.is_empty());
        Self { prefix }
    }

    // == By Id ==
    /// Key for a single product.
    pub fn by_id(id: i64) -> String {
        format!("{}:{}", BY_ID_PATTERN, id)
    }

    // == Paged ==
    /// Key for one page of search results.
    ///
    /// Absent and empty-string filters serialize identically, so they share
    /// an entry.
    pub fn paged(criteria: &SearchCriteria) -> String {
        let digest = Sha256::digest(canonical_signature(criteria).as_bytes());
        format!("{}:{}", PAGED_PATTERN, hex::encode(digest))
    }

    // == Tracking Set ==
    /// Qualified key of the paged-key tracking set.
    pub fn tracking_set(&self) -> String {
        self.qualify(PAGED_INDEX_KEY)
    }

    // == Qualify ==
    /// Applies the configured prefix to a logical key.
    pub fn qualify(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    /// Configured prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// Fixed-order `name=value|...` rendering of every search parameter.
pub fn canonical_signature(criteria: &SearchCriteria) -> String {
    format!(
        "page={}|pageSize={}|search={}|category={}|brand={}|minPrice={}|maxPrice={}|sortBy={}|desc={}",
        criteria.page,
        criteria.page_size,
        criteria.search_term.as_deref().unwrap_or(""),
        criteria.category.as_deref().unwrap_or(""),
        criteria.brand.as_deref().unwrap_or(""),
        format_price(criteria.min_price),
        format_price(criteria.max_price),
        criteria.sort_by.as_deref().unwrap_or(""),
        criteria.descending,
    )
}

// Two decimals so 10.0 and 10.000000001 do not drift apart by representation.
fn format_price(price: Option<f64>) -> String {
    price.map(|p| format!("{:.2}", p)).unwrap_or_default()
}

/// First two `:`-delimited segments of a logical key.
pub fn key_pattern(key: &str) -> &str {
    match key.match_indices(':').nth(1) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}
