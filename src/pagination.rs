//! Page bounds arithmetic for headline listings.
//!
//! Pure functions deriving the page count from the upstream total and
//! validating next/previous navigation. Requests past either bound are not
//! errors; they produce [`PageMove::Boundary`], a signal the display layer
//! can show as "no more pages" without treating it as a failure.
//!
//! While no successful fetch has happened yet the total is unknown, the
//! upper bound is left unenforced and only `page >= 1` holds.

/// Outcome of a next/previous page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    /// Navigation succeeded; this is the new page number.
    Moved(u32),
    /// The requested move would leave the valid page range. No state change.
    Boundary,
}

/// Number of pages implied by `total_results` at the given page size.
///
/// Ceiling division: 25 results at page size 10 means 3 pages. Zero results
/// means zero pages (page 1 is still a valid resting position, it is just
/// empty).
pub fn total_pages(total_results: u64, page_size: u32) -> u64 {
    debug_assert!(page_size >= 1);
    total_results.div_ceil(u64::from(page_size))
}

/// Advance from `current`, bounded by the last known total.
///
/// With an unknown total (no successful fetch yet) the advance is always
/// allowed; once the total is known, moving past `total_pages` is rejected
/// with [`PageMove::Boundary`].
pub fn next_page(current: u32, total_results: Option<u64>, page_size: u32) -> PageMove {
    let candidate = u64::from(current) + 1;
    match total_results {
        Some(total) if candidate > total_pages(total, page_size) => PageMove::Boundary,
        _ => PageMove::Moved(current + 1),
    }
}

/// Step back from `current`. Rejected at the lower bound (`page >= 1`).
pub fn prev_page(current: u32) -> PageMove {
    if current > 1 {
        PageMove::Moved(current - 1)
    } else {
        PageMove::Boundary
    }
}
