//! Fixed-size paging over the popular-products list.
//!
//! The partner returns its whole popular list in one response; the chat
//! frontend shows [`PAGE_SIZE`] cards at a time and asks for pages by number.

use std::ops::Range;

/// Items per page.
pub const PAGE_SIZE: usize = 3;

/// Clamps a requested page number to the first page when it is absent or `<= 0`.
#[must_use]
pub fn normalize_page(page: Option<i64>) -> usize {
    match page {
        Some(p) if p > 0 => usize::try_from(p).unwrap_or(usize::MAX),
        _ => 1,
    }
}

/// Returns the index range of `page` (1-based) within `total` items.
///
/// Returns `None` when the page starts past the end; that is an empty page,
/// not an error.
#[must_use]
pub fn page_range(page: usize, total: usize) -> Option<Range<usize>> {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= total {
        return None;
    }
    let end = start.saturating_add(PAGE_SIZE).min(total);
    Some(start..end)
}
