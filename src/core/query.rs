//! Search parameters and pagination for the invoice list

use serde::{Deserialize, Serialize};

/// Default number of invoices per list page
pub const ITEMS_PER_PAGE: usize = 6;

/// Query parameters read by the invoice list route
///
/// Both parameters are optional and parsed leniently: a missing or
/// unparseable `page` means page 1.
///
/// # Example
/// ```text
/// GET /dashboard/invoices?query=lee&page=2
/// GET /dashboard/invoices?page=1
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchParams {
    /// Free-text search term
    pub query: Option<String>,

    /// Page number as written in the URL (starts at 1)
    pub page: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>, page: usize) -> Self {
        Self {
            query: Some(query.into()),
            page: Some(page.to_string()),
        }
    }

    /// Search term, empty when absent
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Normalized key under which a rendered page is cached
    pub fn cache_key(&self) -> String {
        format!("query={}&page={}", self.query(), self.page())
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The page of data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of matching items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let start = page_offset(page, limit);

        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

/// Ceiling division of `total` by `per_page`
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Offset of the first row of `page` (1-based)
///
/// `page` comes straight from the URL, so the product saturates instead of
/// overflowing.
pub fn page_offset(page: usize, per_page: usize) -> usize {
    (page.max(1) - 1).saturating_mul(per_page)
}
