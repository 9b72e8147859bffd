//! Client-side pagination over an in-memory result set.
//!
//! Page indices are 1-based. Everything here is pure: a `PageWindow` only
//! describes which slice of a list is visible, it never owns the list.

use serde::Serialize;
use std::ops::Range;

/// Page size used before any viewport width is known
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Number of pages for `total` items; never less than 1 so "page 1 of 1" is
/// always representable.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Half-open index range visible on `page_index`, clipped to `total`.
///
/// Out-of-range pages (including page 0) yield an empty range.
pub fn visible_range(total: usize, page_size: usize, page_index: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    if page_index == 0 {
        return 0..0;
    }
    let start = (page_index - 1).saturating_mul(page_size);
    if start >= total {
        return 0..0;
    }
    let end = start.saturating_add(page_size).min(total);
    start..end
}

pub fn visible_slice<T>(items: &[T], page_size: usize, page_index: usize) -> &[T] {
    &items[visible_range(items.len(), page_size, page_index)]
}

/// Cards per page for a viewport width in CSS pixels
pub fn page_size_for_width(width_px: u32) -> usize {
    match width_px {
        w if w >= 1280 => 12,
        w if w >= 1024 => 9,
        w if w >= 768 => 6,
        _ => 4,
    }
}

/// Current `(page_index, page_size)` of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    page_index: usize,
    page_size: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to the first page, keeping the page size
    pub fn reset(&mut self) {
        self.page_index = 1;
    }

    /// Always returns to page 1, even when the size is unchanged
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 1;
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page_index < self.page_count(total)
    }

    /// No-op on the last page
    pub fn next_page(&mut self, total: usize) {
        if self.has_next(total) {
            self.page_index += 1;
        }
    }

    /// No-op on the first page
    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.page_index -= 1;
        }
    }

    /// Jump to a page; out-of-range values are kept and render empty
    pub fn go_to(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// A navigation bar is only needed when the list overflows one page
    pub fn needs_navigation(&self, total: usize) -> bool {
        total > self.page_size
    }

    /// Indices of `total` items shown on the current page
    pub fn range(&self, total: usize) -> Range<usize> {
        visible_range(total, self.page_size, self.page_index)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        visible_slice(items, self.page_size, self.page_index)
    }

    pub fn label(&self, total: usize) -> String {
        format!("Page {} of {}", self.page_index, self.page_count(total))
    }
}
