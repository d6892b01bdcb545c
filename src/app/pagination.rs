//! Paginator and viewport-driven page sizing.
//!
//! [`paginate`] is pure: the page size is passed in, never read from the
//! environment. The environment side lives behind [`PageSizeProvider`], whose
//! plugin implementation is a single-breakpoint [`Breakpoint`] rule.

/// Default width (terminal columns) at which the wide page size applies.
pub const DEFAULT_WIDE_THRESHOLD: usize = 140;

/// Default page size on wide panes.
pub const DEFAULT_WIDE_PAGE_SIZE: usize = 8;

/// Default page size on narrow panes.
pub const DEFAULT_NARROW_PAGE_SIZE: usize = 4;

/// Pagination result for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Clamped 1-based page number.
    pub page: usize,
    /// Index of the first item on the page.
    pub start: usize,
    /// Index one past the last item on the page.
    pub end: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Number of items being paginated.
    pub total_count: usize,
}

impl Page {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based inclusive display bounds, `(0, 0)` for an empty result.
    #[must_use]
    pub const fn display_bounds(&self) -> (usize, usize) {
        if self.total_count == 0 {
            (0, 0)
        } else {
            (self.start + 1, self.end)
        }
    }

    /// Pager text, e.g. `Showing 9–9 of 9 (page 3/3)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let (first, last) = self.display_bounds();
        format!(
            "Showing {first}\u{2013}{last} of {} (page {}/{})",
            self.total_count, self.page, self.total_pages
        )
    }
}

/// Clamps `requested_page` and computes slice bounds.
///
/// A `page_size` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use bookshelf::app::pagination::paginate;
///
/// let page = paginate(9, 4, 5);
/// assert_eq!((page.page, page.start, page.end, page.total_pages), (3, 8, 9, 3));
/// assert_eq!(page.summary(), "Showing 9\u{2013}9 of 9 (page 3/3)");
///
/// let empty = paginate(0, 4, 1);
/// assert_eq!(empty.summary(), "Showing 0\u{2013}0 of 0 (page 1/1)");
/// ```
#[must_use]
pub fn paginate(total_count: usize, page_size: usize, requested_page: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = total_count.min(start + page_size);

    Page {
        page,
        start,
        end,
        total_pages,
        total_count,
    }
}

/// Source of the current page size.
pub trait PageSizeProvider {
    /// Items per page for a pane `width` columns wide.
    fn page_size(&self, width: usize) -> usize;
}

/// Two page sizes split by one width threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub wide_threshold: usize,
    pub wide_page_size: usize,
    pub narrow_page_size: usize,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self {
            wide_threshold: DEFAULT_WIDE_THRESHOLD,
            wide_page_size: DEFAULT_WIDE_PAGE_SIZE,
            narrow_page_size: DEFAULT_NARROW_PAGE_SIZE,
        }
    }
}

impl PageSizeProvider for Breakpoint {
    fn page_size(&self, width: usize) -> usize {
        if width >= self.wide_threshold {
            self.wide_page_size.max(1)
        } else {
            self.narrow_page_size.max(1)
        }
    }
}

/// Fixed page size regardless of width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPageSize(pub usize);

impl PageSizeProvider for FixedPageSize {
    fn page_size(&self, _width: usize) -> usize {
        self.0.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_page_when_everything_fits() {
        let page = paginate(3, 4, 1);
        assert_eq!(page, Page { page: 1, start: 0, end: 3, total_pages: 1, total_count: 3 });
        assert!(!page.has_prev());
        assert!(!page.has_next());
        assert_eq!(page.summary(), "Showing 1\u{2013}3 of 3 (page 1/1)");
    }

    #[test]
    fn requested_page_is_clamped_both_ways() {
        assert_eq!(paginate(9, 4, 0).page, 1);
        assert_eq!(paginate(9, 4, 99).page, 3);
        let middle = paginate(9, 4, 2);
        assert_eq!((middle.start, middle.end), (4, 8));
        assert!(middle.has_prev() && middle.has_next());
    }

    #[test]
    fn empty_result_has_one_empty_page() {
        let page = paginate(0, 8, 3);
        assert_eq!((page.page, page.start, page.end, page.total_pages), (1, 0, 0, 1));
        assert_eq!(page.display_bounds(), (0, 0));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let page = paginate(2, 0, 2);
        assert_eq!((page.page, page.start, page.end, page.total_pages), (2, 1, 2, 2));
    }

    #[test]
    fn breakpoint_yields_two_sizes() {
        let rule = Breakpoint::default();
        assert_eq!(rule.page_size(0), 4);
        assert_eq!(rule.page_size(139), 4);
        assert_eq!(rule.page_size(140), 8);
        assert_eq!(rule.page_size(300), 8);
    }

    #[test]
    fn resize_alone_can_move_the_clamped_page() {
        let rule = Breakpoint::default();
        let narrow = paginate(9, rule.page_size(80), 3);
        assert_eq!((narrow.page, narrow.total_pages), (3, 3));
        let wide = paginate(9, rule.page_size(200), narrow.page);
        assert_eq!((wide.page, wide.total_pages), (2, 2));
    }

    proptest! {
        #[test]
        fn prop_page_and_bounds_stay_in_range(
            total in 0usize..500,
            size in 0usize..20,
            requested in 0usize..100,
        ) {
            let page = paginate(total, size, requested);
            prop_assert!(1 <= page.page && page.page <= page.total_pages);
            prop_assert!(page.start <= page.end && page.end <= total);
            prop_assert_eq!(page, paginate(total, size, requested));
        }
    }
}
