//! Pagination over the filtered section set.
//!
//! Pure window arithmetic: page counts, page clamping, and the slice of the
//! filtered set shown on the current page. Pages are 1-based to match the
//! user-facing indicator text; the page size is a fixed constant of one brand
//! section per page.

use std::ops::Range;

/// Number of brand sections shown per page.
pub const SECTIONS_PER_PAGE: usize = 1;

/// Total number of pages for a filtered set of `len` sections.
///
/// An empty set still has one (empty) page so the indicator never reads
/// "Page 1 / 0".
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    ((len + page_size - 1) / page_size).max(1)
}

/// Clamps a 1-based page index into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// The index range of `filtered` shown on `page`.
///
/// The range end is clamped to `len`, so the final partial page (impossible
/// with a page size of one, but kept general) never overruns.
#[must_use]
pub fn page_window(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page = clamp_page(page, len, page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(len);
    start..end
}

/// Formats the pagination indicator text.
#[must_use]
pub fn page_label(page: usize, total: usize) -> String {
    format!("Page {page} / {total}")
}
