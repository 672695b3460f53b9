//! Pagination state for section lists.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Pagination state attached to every fetched list page.
///
/// The backend serializes the total page count under the key `pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total matching items across all pages.
    pub total: u64,
    /// Total number of pages.
    #[serde(rename = "pages")]
    pub total_pages: u32,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl Pagination {
    /// Creates pagination for `total` items, clamping `page` into
    /// `[1, max(total_pages, 1)]` and deriving the navigation flags.
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(u64::from(per_page)) as u32;
        let page = page.clamp(1, total_pages.max(1));
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Creates single-page pagination for endpoints that do not paginate.
    pub fn single(total: u64) -> Self {
        let per_page = total.clamp(1, u64::from(u32::MAX)) as u32;
        Self::new(1, per_page, total)
    }

    /// Returns the page numbers pagination controls should show: a window
    /// of `radius` pages on each side of the current page, clamped to the
    /// valid range. Empty when there is at most one page.
    pub fn window(&self, radius: u32) -> RangeInclusive<u32> {
        if self.total_pages <= 1 {
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        let start = self.page.saturating_sub(radius).max(1);
        let end = self.page.saturating_add(radius).min(self.total_pages);
        start..=end
    }
}
