//! Shared pagination utilities
//!
//! Pages are 0-indexed: `page=0` is the first page.
//!
//! # Examples
//!
//! ```rust,ignore
//! use netdev_server::features::shared::pagination::{PaginationParams, PaginationMetadata};
//!
//! let params = PaginationParams::new(Some(2), Some(20));
//! assert_eq!(params.offset(), 40);
//!
//! // After fetching data...
//! let metadata = PaginationMetadata::from_params(&params, 100);
//! ```

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination request parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number (0-indexed). Defaults to 0, negative values clamp to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Items per page. Defaults to 20, clamped to 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self { page, size }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Offset for the SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        self.page().saturating_mul(self.size())
    }
}

/// Pagination metadata returned alongside a page of items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMetadata {
    /// Current page number (0-indexed)
    pub page: i64,
    pub size: i64,
    /// Total number of matching items
    pub total: i64,
    /// Total number of pages
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMetadata {
    pub fn new(page: i64, size: i64, total: i64) -> Self {
        let pages = if total <= 0 { 0 } else { (total - 1) / size.max(1) + 1 };

        Self {
            page,
            size,
            total,
            pages,
            has_next: page.saturating_add(1) < pages,
            has_prev: page > 0,
        }
    }

    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        Self::new(params.page(), params.size(), total)
    }
}

/// A page of items plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> Paginated<T> {
    pub fn from_items(items: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            items,
            pagination: PaginationMetadata::from_params(params, total),
        }
    }
}
