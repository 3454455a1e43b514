//! Product record
//!
//! The single projection cached for by-id lookups and inside search pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as returned by the product store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Category name, matched case-insensitively when filtering
    pub category: String,
    /// Brand name, matched case-insensitively when filtering
    pub brand: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub stock_quantity: i32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time, None until the first update
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
