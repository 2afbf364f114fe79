//! Page index and page size.

use crate::query::DEFAULT_PAGE_SIZE;

/// Current page of a server-paginated grid.
///
/// Every mutation returns `true` when the state actually changed. The page
/// count is owned by the last fetched page, so navigation methods take it as
/// an argument; `None` means no page has been fetched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, greater than zero.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Starts on the first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Jumps to `index`, clamped to the last page when the count is known.
    pub fn set_page_index(&mut self, index: usize, page_count: Option<usize>) -> bool {
        let index = match page_count {
            Some(count) => index.min(count.saturating_sub(1)),
            None => index,
        };
        self.replace_index(index)
    }

    pub fn first_page(&mut self) -> bool {
        self.replace_index(0)
    }

    pub fn previous_page(&mut self) -> bool {
        self.can_previous_page() && self.replace_index(self.page_index - 1)
    }

    pub fn next_page(&mut self, page_count: Option<usize>) -> bool {
        match self.page_index.checked_add(1) {
            Some(next) => self.can_next_page(page_count) && self.replace_index(next),
            None => false,
        }
    }

    pub fn last_page(&mut self, page_count: usize) -> bool {
        self.replace_index(page_count.saturating_sub(1))
    }

    /// Changes the page size, keeping the first visible row on screen.
    ///
    /// A size of zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        let first_row = self.page_index.saturating_mul(self.page_size);
        self.page_index = first_row / page_size;
        self.page_size = page_size;
        true
    }

    pub fn reset_page_index(&mut self) -> bool {
        self.replace_index(0)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// With an unknown page count, moving forward is allowed.
    pub fn can_next_page(&self, page_count: Option<usize>) -> bool {
        match page_count {
            Some(count) => self.page_index.saturating_add(1) < count,
            None => true,
        }
    }

    fn replace_index(&mut self, index: usize) -> bool {
        if self.page_index == index {
            return false;
        }
        self.page_index = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_respects_bounds() {
        let mut pagination = Pagination::new(10);
        assert!(!pagination.previous_page());
        assert!(pagination.next_page(Some(3)));
        assert!(pagination.next_page(Some(3)));
        assert!(!pagination.next_page(Some(3)));
        assert_eq!(pagination.page_index, 2);

        assert!(pagination.previous_page());
        assert!(pagination.last_page(3));
        assert_eq!(pagination.page_index, 2);
        assert!(pagination.first_page());
        assert_eq!(pagination.page_index, 0);
    }

    #[test]
    fn test_set_page_index_clamps_to_known_count() {
        let mut pagination = Pagination::new(10);
        assert!(pagination.set_page_index(99, Some(4)));
        assert_eq!(pagination.page_index, 3);

        assert!(pagination.set_page_index(7, None));
        assert_eq!(pagination.page_index, 7);

        assert!(pagination.set_page_index(5, Some(0)));
        assert_eq!(pagination.page_index, 0);
    }

    #[test]
    fn test_page_size_keeps_first_visible_row() {
        let mut pagination = Pagination::new(10);
        pagination.set_page_index(3, None);

        assert!(pagination.set_page_size(20));
        assert_eq!(pagination.page_index, 1);

        assert!(pagination.set_page_size(5));
        assert_eq!(pagination.page_index, 4);

        assert!(!pagination.set_page_size(0));
        assert!(!pagination.set_page_size(5));
    }

    #[test]
    fn test_huge_index_before_first_page_does_not_overflow() {
        let mut pagination = Pagination::new(10);
        assert!(pagination.set_page_index(usize::MAX / 2, None));
        assert!(pagination.set_page_size(20));
        assert_eq!(pagination.page_index, usize::MAX / 20);

        assert!(pagination.set_page_index(usize::MAX, None));
        assert!(!pagination.next_page(None));
        assert!(!pagination.next_page(Some(3)));
        assert_eq!(pagination.page_index, usize::MAX);
        assert!(!pagination.can_next_page(Some(usize::MAX)));
    }

    #[test]
    fn test_unknown_count_allows_next() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page_size, 10);
        assert!(pagination.can_next_page(None));
        assert!(!pagination.can_next_page(Some(1)));
        assert!(!pagination.can_next_page(Some(0)));
    }
}
