//! Search criteria and paged results

use serde::{Deserialize, Serialize};

// == Paging Limits ==
/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a store accepts
pub const MAX_PAGE_SIZE: u32 = 100;

// == Search Criteria ==
/// Every parameter of a filtered, sorted, paged product search.
///
/// Deserializes from the query string of `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Substring matched against name and description
    #[serde(default, rename = "search")]
    pub search_term: Option<String>,
    /// Exact category filter
    #[serde(default)]
    pub category: Option<String>,
    /// Exact brand filter
    #[serde(default)]
    pub brand: Option<String>,
    /// Inclusive lower price bound
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Sort field: `name`, `price`, `created`; anything else sorts by id
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Reverse the sort order
    #[serde(default)]
    pub descending: bool,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search_term: None,
            category: None,
            brand: None,
            min_price: None,
            max_price: None,
            sort_by: None,
            descending: false,
        }
    }
}

impl SearchCriteria {
    /// Validates paging and price bounds.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.page == 0 {
            return Some("Page must be at least 1".to_string());
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Some(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            ));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Some("Minimum price cannot exceed maximum price".to_string());
            }
        }
        if self.min_price.is_some_and(|p| p < 0.0) || self.max_price.is_some_and(|p| p < 0.0) {
            return Some("Price bounds cannot be negative".to_string());
        }
        None
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }
}

// == Page ==
/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    /// Requested page size
    pub page_size: u32,
    /// Matches across all pages
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total_count` items.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria() {
        let criteria = SearchCriteria::default();
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, DEFAULT_PAGE_SIZE);
        assert!(!criteria.descending);
        assert!(criteria.validate().is_none());
    }

    #[test]
    fn test_deserialize_query_names() {
        let json = r#"{"search": "shoe", "pageSize": 5, "minPrice": 10.0, "sortBy": "price"}"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, 5);
        assert_eq!(criteria.search_term.as_deref(), Some("shoe"));
        assert_eq!(criteria.min_price, Some(10.0));
        assert_eq!(criteria.sort_by.as_deref(), Some("price"));
    }

    #[test]
    fn test_validate_rejects_bad_paging() {
        let zero_page = SearchCriteria {
            page: 0,
            ..SearchCriteria::default()
        };
        assert!(zero_page.validate().is_some());

        let huge = SearchCriteria {
            page_size: MAX_PAGE_SIZE + 1,
            ..SearchCriteria::default()
        };
        assert!(huge.validate().is_some());
    }

    #[test]
    fn test_validate_rejects_inverted_price_range() {
        let criteria = SearchCriteria {
            min_price: Some(50.0),
            max_price: Some(10.0),
            ..SearchCriteria::default()
        };
        assert!(criteria.validate().is_some());
    }

    #[test]
    fn test_offset() {
        let criteria = SearchCriteria {
            page: 3,
            page_size: 10,
            ..SearchCriteria::default()
        };
        assert_eq!(criteria.offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        let page: Page<u8> = Page {
            items: vec![],
            page: 1,
            page_size: 20,
            total_count: 41,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
