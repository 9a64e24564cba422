//! Page bookkeeping: the metadata the service reports and the state the view renders.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest `per_page` the service accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination block of a list response.
///
/// The service does not always include `has_next`/`has_prev`; the accessors
/// derive them from `page` and `total_pages` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub page: u32,
    pub per_page: u32,
    pub total_files: u64,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

impl PaginationMetadata {
    pub fn has_next(&self) -> bool {
        self.has_next.unwrap_or(self.page < self.total_pages)
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev.unwrap_or(self.page > 1)
    }
}

/// Derived pagination view. Always internally consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_files: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationState {
    pub fn new(current_page: u32, items_per_page: u32, total_files: u64) -> Self {
        let items_per_page = items_per_page.max(1);
        let total_pages = total_pages(total_files, items_per_page);
        let current_page = clamp_page(current_page, total_pages);

        Self {
            current_page,
            items_per_page,
            total_files,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.current_page as usize - 1) * self.items_per_page as usize
    }

    /// The current page's window into `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.items_per_page as usize).min(items.len());
        &items[start..end]
    }

    /// One-based first and last position shown on this page, e.g. `(11, 20)`.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total_files == 0 {
            return None;
        }
        let first = self.offset() as u64 + 1;
        let last = (first + u64::from(self.items_per_page) - 1).min(self.total_files);
        (first <= last).then_some((first, last))
    }
}

/// `ceil(total_files / per_page)`, saturating at `u32::MAX`.
pub fn total_pages(total_files: u64, per_page: u32) -> u32 {
    let pages = total_files.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamps `page` into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}
