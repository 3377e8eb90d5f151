//! Paged result sets.
//!
//! Every list operation in the service layer returns a [`PagedList`]. The
//! derived values (`total_pages`, `has_next_page`, ...) are computed from the
//! three stored numbers so they can never drift apart.

use serde::{Deserialize, Serialize};

/// Default page size when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page coordinates requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page_index: u32,
    /// Number of items per page
    pub page_size: u32,
}

impl PageRequest {
    /// Create a page request, clamping the page size into `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub const fn new(page_index: u32, page_size: u32) -> Self {
        let page_size = if page_size == 0 {
            1
        } else if page_size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            page_index,
            page_size,
        }
    }

    /// A request for everything on a single page.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            page_index: 0,
            page_size: u32::MAX,
        }
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page_index as usize * self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// A single page of items plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_index: u32,
    page_size: u32,
    total_count: u64,
}

impl<T> PagedList<T> {
    /// Build a page from already-sliced items.
    #[must_use]
    pub const fn from_parts(items: Vec<T>, page_index: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            items,
            page_index,
            page_size,
            total_count,
        }
    }

    /// Slice one page out of a complete result set.
    #[must_use]
    pub fn paginate(all: Vec<T>, page: PageRequest) -> Self {
        let total_count = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset())
            .take(page.page_size as usize)
            .collect();
        Self::from_parts(items, page.page_index, page.page_size, total_count)
    }

    /// An empty page.
    #[must_use]
    pub const fn empty(page: PageRequest) -> Self {
        Self::from_parts(Vec::new(), page.page_index, page.page_size, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of pages; zero when the page size is zero.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size as u64)
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        (self.page_index as u64) + 1 < self.total_pages()
    }

    /// Transform the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0).page_size, 1);
        assert_eq!(PageRequest::new(0, 500).page_size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::default().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_middle_page() {
        let page = PagedList::paginate((1..=25).collect(), PageRequest::new(1, 10));
        assert_eq!(page.items(), &(11..=20).collect::<Vec<_>>()[..]);
        assert_eq!(page.total_count(), 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous_page());
        assert!(page.has_next_page());
    }

    #[test]
    fn test_paginate_past_the_end() {
        let page = PagedList::paginate(vec![1, 2, 3], PageRequest::new(5, 10));
        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 3);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_zero_page_size_has_no_pages() {
        let page: PagedList<i32> = PagedList::from_parts(vec![], 0, 0, 10);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_all_request_returns_everything() {
        let page = PagedList::paginate((0..250).collect::<Vec<_>>(), PageRequest::all());
        assert_eq!(page.items().len(), 250);
        assert_eq!(page.total_pages(), 1);
    }

    proptest! {
        #[test]
        fn prop_page_metadata_consistent(total in 0usize..500, index in 0u32..30, size in 1u32..=100) {
            let page = PagedList::paginate(vec![0u8; total], PageRequest::new(index, size));
            let pages = page.total_pages();
            prop_assert_eq!(pages, (total as u64).div_ceil(u64::from(size)));
            prop_assert!(page.items().len() <= size as usize);
            prop_assert_eq!(page.has_next_page(), u64::from(index) + 1 < pages);
            prop_assert_eq!(page.has_previous_page(), index > 0);
            if u64::from(index) + 1 < pages {
                prop_assert_eq!(page.items().len(), size as usize);
            }
        }
    }
}
