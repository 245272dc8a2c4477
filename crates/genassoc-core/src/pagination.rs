//! Page request translation.
//!
//! A client asks for `(index, size)`; the warehouse wants `LIMIT/OFFSET` and
//! the search engine wants `(from, size)`. Both forms share the same offset
//! `index * size`, computed from the requested size, so a page starts at the
//! same record whichever store serves it. Only the returned size is clamped.

use serde::{Deserialize, Serialize};

use crate::config::PaginationLimits;

/// A client page request; absent fields take configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub index: Option<u64>,
    pub size: Option<u64>,
}

impl PageRequest {
    #[must_use]
    pub const fn new(index: Option<u64>, size: Option<u64>) -> Self {
        Self { index, size }
    }
}

/// `LIMIT <limit> OFFSET <offset>` for warehouse queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarehousePage {
    pub limit: u64,
    pub offset: u64,
}

impl WarehousePage {
    /// Render as a SQL fragment. Both values are integers computed here, never
    /// client text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit, self.offset)
    }
}

/// `(from, size)` window for search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub from: u64,
    pub size: u64,
}

/// Translates page requests using configured bounds.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    limits: PaginationLimits,
}

impl Paginator {
    #[must_use]
    pub const fn new(limits: PaginationLimits) -> Self {
        Self { limits }
    }

    fn resolve(&self, request: PageRequest) -> (u64, u64) {
        let index = request.index.unwrap_or(0);
        let size = request
            .size
            .filter(|size| *size > 0)
            .unwrap_or(self.limits.default_size);
        (index, size)
    }

    /// Warehouse form, with the limit clamped to `max_warehouse_size`.
    ///
    /// The offset is computed from the requested size, not the clamped one,
    /// so an oversized page leaves a gap: `(index 1, size 1000)` with a
    /// maximum of 500 yields `LIMIT 500 OFFSET 1000` and rows 500..1000 are
    /// never returned by pages of that size.
    #[must_use]
    pub fn warehouse(&self, request: PageRequest) -> WarehousePage {
        let (index, size) = self.resolve(request);
        WarehousePage {
            limit: size.min(self.limits.max_warehouse_size),
            offset: index.saturating_mul(size),
        }
    }

    /// Search form, with the size clamped to `max_search_size` and to what is
    /// left of `max_search_window` after `from`.
    #[must_use]
    pub fn search(&self, request: PageRequest) -> SearchWindow {
        let (index, size) = self.resolve(request);
        let from = index.saturating_mul(size);
        let remaining = self.limits.max_search_window.saturating_sub(from);
        SearchWindow {
            from,
            size: size.min(self.limits.max_search_size).min(remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> Paginator {
        Paginator::new(PaginationLimits::default())
    }

    #[test]
    fn test_defaults_when_absent() {
        let page = paginator().warehouse(PageRequest::default());
        assert_eq!(page, WarehousePage { limit: 20, offset: 0 });
        assert_eq!(page.to_sql(), "LIMIT 20 OFFSET 0");

        let window = paginator().search(PageRequest::default());
        assert_eq!(window, SearchWindow { from: 0, size: 20 });
    }

    #[test]
    fn test_zero_size_uses_default() {
        let page = paginator().warehouse(PageRequest::new(Some(2), Some(0)));
        assert_eq!(page, WarehousePage { limit: 20, offset: 40 });
    }

    #[test]
    fn test_offset_arithmetic_matches_between_forms() {
        let request = PageRequest::new(Some(3), Some(50));
        let page = paginator().warehouse(request);
        let window = paginator().search(request);
        assert_eq!(page.offset, 150);
        assert_eq!(window.from, 150);
        assert_eq!(page.limit, 50);
        assert_eq!(window.size, 50);
    }

    #[test]
    fn test_sizes_are_clamped() {
        let request = PageRequest::new(Some(1), Some(1_000));
        let page = paginator().warehouse(request);
        let window = paginator().search(request);
        assert_eq!(page.limit, 500);
        assert_eq!(page.offset, 1_000);
        assert_eq!(window.size, 100);
        assert_eq!(window.from, 1_000);
    }

    #[test]
    fn test_search_window_is_bounded() {
        let window = paginator().search(PageRequest::new(Some(199), Some(60)));
        assert_eq!(window.from, 11_940);
        assert_eq!(window.size, 0);

        let window = paginator().search(PageRequest::new(Some(99), Some(100)));
        assert_eq!(window.from, 9_900);
        assert_eq!(window.size, 100);
    }

    #[test]
    fn test_huge_index_saturates() {
        let page = paginator().warehouse(PageRequest::new(Some(u64::MAX), Some(10)));
        assert_eq!(page.offset, u64::MAX);
    }
}
