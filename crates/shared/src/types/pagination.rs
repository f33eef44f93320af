//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// `?page=&per_page=` query of list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Clamps the request to page >= 1 and 1..=`MAX_PER_PAGE` items.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Rows to return.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// One page of a list plus its position in the whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages, at least 1.
    pub total_pages: u64,
    /// Whether pages follow this one.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Wraps one page of `data` out of `total` records.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let per_page = u64::from(request.per_page.max(1));
        let total_pages = total.div_ceil(per_page).max(1);

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                per_page: request.per_page,
                total,
                total_pages,
                has_more: u64::from(request.page) < total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u32, per_page: u32) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn test_query_defaults() {
        let request = PageRequest::default();
        assert_eq!((request.page, request.per_page), (1, 20));
    }

    #[test]
    fn test_offset_and_limit() {
        assert_eq!(page(3, 20).offset(), 40);
        assert_eq!(page(3, 20).limit(), 20);
        assert_eq!(page(0, 20).offset(), 0);
    }

    #[test]
    fn test_normalized_clamps() {
        let request = page(0, 5000).normalized();
        assert_eq!((request.page, request.per_page), (1, MAX_PER_PAGE));
        assert_eq!(page(2, 0).normalized().per_page, 1);
    }

    #[test]
    fn test_meta() {
        let cases = [(0, 1, 1, false), (20, 1, 1, false), (21, 1, 2, true), (21, 2, 2, false)];

        for (total, current, total_pages, has_more) in cases {
            let meta = PageResponse::<u8>::new(vec![], page(current, 20), total).meta;
            assert_eq!(meta.total_pages, total_pages, "total {total}");
            assert_eq!(meta.has_more, has_more, "total {total}, page {current}");
        }
    }
}
