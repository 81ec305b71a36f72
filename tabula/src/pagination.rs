//! Pagination calculator.

use std::ops::Range;

/// Default number of items per page.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Number of pages needed for `total` items, never less than one.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Clamps a 1-based page number into `[1, total_pages]`.
pub fn clamp_page(page: usize, total: usize, per_page: usize) -> usize {
    page.clamp(1, total_pages(total, per_page))
}

/// Page position: 1-based `page` and a positive `per_page`.
///
/// The total is not stored; every operation that depends on it takes it as
/// an argument so the caller decides whether it is the local filtered count
/// or an authoritative count from the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Pagination {
    /// Starts on page 1. A zero page size is raised to 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Returns the stored 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Changes the page size and returns to page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// Moves to page `n`, clamped into range.
    pub fn go_to_page(&mut self, n: usize, total: usize) {
        self.page = clamp_page(n, total, self.per_page);
    }

    /// Advances one page if there is a next page.
    pub fn next_page(&mut self, total: usize) -> bool {
        if self.summary(total).has_next {
            self.page = clamp_page(self.page, total, self.per_page) + 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page if there is a previous page.
    pub fn prev_page(&mut self, total: usize) -> bool {
        if self.summary(total).has_prev {
            self.page = clamp_page(self.page, total, self.per_page) - 1;
            true
        } else {
            false
        }
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) {
        self.page = 1;
    }

    /// Goes to the last page.
    pub fn last_page(&mut self, total: usize) {
        self.page = total_pages(total, self.per_page);
    }

    /// Pulls the stored page back into range after `total` changed.
    ///
    /// A page that is still valid is left alone. Returns `true` if the page
    /// moved.
    pub fn clamp(&mut self, total: usize) -> bool {
        let clamped = clamp_page(self.page, total, self.per_page);
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Describes the window over `total` items.
    pub fn summary(&self, total: usize) -> PageSummary {
        let total_pages = total_pages(total, self.per_page);
        let page = self.page.clamp(1, total_pages);
        let start = ((page - 1) * self.per_page).min(total);
        let end = (page * self.per_page).min(total);
        PageSummary {
            page,
            per_page: self.per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
            start,
            end,
        }
    }
}

/// Where the current page sits within the paginated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// Effective 1-based page, already clamped.
    pub page: usize,
    pub per_page: usize,
    /// Item count pagination is computed over.
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    /// Index of the first item on the page (0-based).
    pub start: usize,
    /// One past the last item on the page.
    pub end: usize,
}

impl PageSummary {
    /// Index range of the page within the paginated set.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Human-readable position, e.g. `Showing 6-10 of 12`.
    pub fn describe(&self) -> String {
        if self.total == 0 {
            "No items".to_string()
        } else {
            format!("Showing {}-{} of {}", self.start + 1, self.end, self.total)
        }
    }
}

/// The items on the current page plus where that page sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    pub summary: PageSummary,
}

/// Slices `items` to the current page, with `total = items.len()`.
pub fn paginate<'a, T>(items: &'a [T], state: &Pagination) -> PageWindow<'a, T> {
    paginate_with_total(items, state, items.len())
}

/// Slices `items` to the current page, computing page math over `total`.
///
/// `total` may differ from `items.len()` when the data provider reports an
/// authoritative count; the slice is still bounded by the local items.
pub fn paginate_with_total<'a, T>(items: &'a [T], state: &Pagination, total: usize) -> PageWindow<'a, T> {
    let summary = state.summary(total);
    let start = summary.start.min(items.len());
    let end = summary.end.min(items.len());
    PageWindow {
        items: &items[start..end],
        summary,
    }
}
