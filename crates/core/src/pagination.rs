//! Page math for listings.

use std::ops::Range;

/// Products per page on the listing.
pub const PRODUCTS_PER_PAGE: usize = 10;

/// Products highlighted on the home page.
pub const FEATURED_PRODUCT_COUNT: usize = 4;

/// Pages shown either side of the current page in the page strip.
const WINDOW: usize = 1;

/// One entry in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Pagination state for a list of `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    total_pages: usize,
    per_page: usize,
    total_items: usize,
}

impl Pagination {
    /// Compute pagination, clamping the requested page into range.
    ///
    /// `per_page` of zero is treated as one.
    #[must_use]
    pub fn new(total_items: usize, per_page: usize, requested_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        let current = requested_page.clamp(1, total_pages.max(1));

        Self {
            current,
            total_pages,
            per_page,
            total_items,
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Item index range for the current page.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    /// Slice out the current page.
    #[must_use]
    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.range()).unwrap_or_default()
    }

    /// The page strip: first, last, and a window around the current page,
    /// with gaps where pages are skipped.
    ///
    /// Empty when everything fits on one page.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }

        let total = self.total_pages;
        let mut links = vec![PageLink::Page(1)];

        if self.current.saturating_sub(WINDOW) > 2 {
            links.push(PageLink::Gap);
        }

        let start = self.current.saturating_sub(WINDOW).max(2);
        let end = (self.current + WINDOW).min(total - 1);
        links.extend((start..=end).map(PageLink::Page));

        if self.current + WINDOW < total - 1 {
            links.push(PageLink::Gap);
        }

        links.push(PageLink::Page(total));
        links
    }
}
