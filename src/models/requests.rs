//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Longest accepted product name, in characters
pub const MAX_NAME_LENGTH: usize = 200;

/// Largest batch `seed` accepts
pub const MAX_SEED_COUNT: usize = 1000;

/// Request body for `POST /products`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Request body for `PUT /products/:id`
///
/// Replaces every mutable field of the product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Request body for `POST /seed`
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRequest {
    pub count: usize,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_fields(
            &self.name,
            &self.category,
            &self.brand,
            self.price,
            self.stock_quantity,
        )
    }
}

impl UpdateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_fields(
            &self.name,
            &self.category,
            &self.brand,
            self.price,
            self.stock_quantity,
        )
    }
}

impl SeedRequest {
    /// Returns an error message if the count is out of range.
    pub fn validate(&self) -> Option<String> {
        validate_seed_count(self.count)
    }
}

/// Shared range check for seed batches.
pub fn validate_seed_count(count: usize) -> Option<String> {
    if count == 0 || count > MAX_SEED_COUNT {
        return Some(format!("Seed count must be between 1 and {}", MAX_SEED_COUNT));
    }
    None
}

fn validate_fields(
    name: &str,
    category: &str,
    brand: &str,
    price: f64,
    stock_quantity: i32,
) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        ));
    }
    if category.trim().is_empty() {
        return Some("Category cannot be empty".to_string());
    }
    if brand.trim().is_empty() {
        return Some("Brand cannot be empty".to_string());
    }
    if !price.is_finite() || price < 0.0 {
        return Some("Price must be a non-negative number".to_string());
    }
    if stock_quantity < 0 {
        return Some("Stock quantity cannot be negative".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Mug", "category": "Kitchen", "brand": "Acme", "price": 9.99}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Mug");
        assert_eq!(req.stock_quantity, 0);
        assert!(req.description.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_name() {
        let req = CreateProductRequest {
            name: "  ".to_string(),
            description: None,
            category: "Kitchen".to_string(),
            brand: "Acme".to_string(),
            price: 1.0,
            stock_quantity: 1,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_negative_price() {
        let req = UpdateProductRequest {
            name: "Mug".to_string(),
            description: None,
            category: "Kitchen".to_string(),
            brand: "Acme".to_string(),
            price: -0.01,
            stock_quantity: 1,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_seed_count_bounds() {
        assert!(SeedRequest { count: 0 }.validate().is_some());
        assert!(SeedRequest { count: 10 }.validate().is_none());
        assert!(SeedRequest {
            count: MAX_SEED_COUNT + 1
        }
        .validate()
        .is_some());
    }
}
