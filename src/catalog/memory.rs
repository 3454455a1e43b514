//! In-Memory Product Store
//!
//! `BTreeMap`-backed product store with validation, filtering, sorting and
//! paging. Ids are assigned sequentially starting at 1.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::catalog::ProductStore;
use crate::error::{CatalogError, Result};
use crate::models::requests::validate_seed_count;
use crate::models::{CreateProductRequest, Page, Product, SearchCriteria, UpdateProductRequest};

const SEED_CATEGORIES: [&str; 5] = ["Electronics", "Books", "Kitchen", "Outdoors", "Toys"];
const SEED_BRANDS: [&str; 4] = ["Acme", "Northwind", "Contoso", "Globex"];

#[derive(Debug)]
struct Inventory {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Inventory {
    fn insert(&mut self, request: CreateProductRequest) -> Product {
        let product = Product {
            id: self.next_id,
            name: request.name.trim().to_string(),
            description: request.description,
            category: request.category.trim().to_string(),
            brand: request.brand.trim().to_string(),
            price: request.price,
            stock_quantity: request.stock_quantity,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.next_id += 1;
        self.products.insert(product.id, product.clone());
        product
    }
}

// == In-Memory Product Store ==
/// Product store holding every record in process memory.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inventory: RwLock<Inventory>,
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProductStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inventory: RwLock::new(Inventory {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.inventory.read().await.products.len()
    }

    /// Returns true if no products are stored.
    pub async fn is_empty(&self) -> bool {
        self.inventory.read().await.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_by_id(&self, id: i64) -> Result<Product> {
        self.inventory
            .read()
            .await
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Page<Product>> {
        if let Some(error_msg) = criteria.validate() {
            return Err(CatalogError::Validation(error_msg));
        }

        let inventory = self.inventory.read().await;
        let mut matches: Vec<&Product> = inventory
            .products
            .values()
            .filter(|product| matches_criteria(product, criteria))
            .collect();

        sort_products(&mut matches, criteria.sort_by.as_deref(), criteria.descending);

        let total_count = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(criteria.offset())
            .take(criteria.page_size as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page: criteria.page,
            page_size: criteria.page_size,
            total_count,
        })
    }

    async fn create(&self, request: CreateProductRequest) -> Result<Product> {
        if let Some(error_msg) = request.validate() {
            return Err(CatalogError::Validation(error_msg));
        }

        let product = self.inventory.write().await.insert(request);
        debug!(id = product.id, "Product created");
        Ok(product)
    }

    async fn update(&self, id: i64, request: UpdateProductRequest) -> Result<Product> {
        if let Some(error_msg) = request.validate() {
            return Err(CatalogError::Validation(error_msg));
        }

        let mut inventory = self.inventory.write().await;
        let product = inventory
            .products
            .get_mut(&id)
            .ok_or(CatalogError::NotFound(id))?;

        product.name = request.name.trim().to_string();
        product.description = request.description;
        product.category = request.category.trim().to_string();
        product.brand = request.brand.trim().to_string();
        product.price = request.price;
        product.stock_quantity = request.stock_quantity;
        product.updated_at = Some(Utc::now());

        debug!(id, "Product updated");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        match self.inventory.write().await.products.remove(&id) {
            Some(_) => {
                debug!(id, "Product deleted");
                Ok(())
            }
            None => Err(CatalogError::NotFound(id)),
        }
    }

    async fn seed(&self, count: usize) -> Result<usize> {
        if let Some(error_msg) = validate_seed_count(count) {
            return Err(CatalogError::Validation(error_msg));
        }

        let mut inventory = self.inventory.write().await;
        for n in 0..count {
            let serial = inventory.next_id;
            inventory.insert(seed_request(serial, n));
        }

        debug!(count, "Products seeded");
        Ok(count)
    }
}

// == Filtering ==
fn matches_criteria(product: &Product, criteria: &SearchCriteria) -> bool {
    if let Some(term) = non_blank(criteria.search_term.as_deref()) {
        let term = term.to_lowercase();
        let in_name = product.name.to_lowercase().contains(&term);
        let in_description = product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term));
        if !in_name && !in_description {
            return false;
        }
    }
    if let Some(category) = non_blank(criteria.category.as_deref()) {
        if !product.category.eq_ignore_ascii_case(category) {
            return false;
        }
    }
    if let Some(brand) = non_blank(criteria.brand.as_deref()) {
        if !product.brand.eq_ignore_ascii_case(brand) {
            return false;
        }
    }
    if criteria.min_price.is_some_and(|min| product.price < min) {
        return false;
    }
    if criteria.max_price.is_some_and(|max| product.price > max) {
        return false;
    }
    true
}

/// Empty and whitespace-only filters mean "no filter".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// == Sorting ==
fn sort_products(products: &mut [&Product], sort_by: Option<&str>, descending: bool) {
    let field = sort_by.map(|s| s.trim().to_lowercase()).unwrap_or_default();

    products.sort_by(|a, b| {
        let ordering = match field.as_str() {
            "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            "price" => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            "created" | "createdat" => a.created_at.cmp(&b.created_at),
            _ => a.id.cmp(&b.id),
        }
        .then_with(|| a.id.cmp(&b.id));

        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn seed_request(serial: i64, n: usize) -> CreateProductRequest {
    let category = SEED_CATEGORIES[n % SEED_CATEGORIES.len()];
    let brand = SEED_BRANDS[n % SEED_BRANDS.len()];
    CreateProductRequest {
        name: format!("{} {} #{}", brand, category, serial),
        description: Some(format!("Sample {} item from {}", category.to_lowercase(), brand)),
        category: category.to_string(),
        brand: brand.to_string(),
        price: 5.0 + ((serial * 37) % 500) as f64 + 0.99,
        stock_quantity: ((serial * 13) % 100) as i32,
    }
}
