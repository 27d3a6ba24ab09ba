//! Page navigation over an already-capped result sequence

use serde::{Deserialize, Serialize};

/// Items per page when the caller does not configure one
pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

/// Immutable pagination state.
///
/// Navigation returns a new value; the current page is 1-based and always
/// stays within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pagination {
    /// Start at page 1. An `items_per_page` of 0 is treated as 1.
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            total_items,
            items_per_page: items_per_page.max(1),
            current_page: 1,
        }
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn next(self) -> Self {
        self.go_to(self.current_page + 1)
    }

    pub fn previous(self) -> Self {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into range
    pub fn go_to(self, page: usize) -> Self {
        Self {
            current_page: page.clamp(1, self.last_page()),
            ..self
        }
    }

    /// Index range of the current page within the sequence
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.items_per_page).min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }

    /// Items of the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// "Showing X to Y of Z results" where Z is the sequence length
    pub fn summary(&self) -> String {
        let range = self.range();
        let first = if range.is_empty() { 0 } else { range.start + 1 };
        format!(
            "Showing {} to {} of {} results",
            first, range.end, self.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_pages_for_120_items() {
        let pages = Pagination::new(120, 50);
        assert_eq!(pages.total_pages(), 3);
        assert_eq!(pages.current_page(), 1);
        assert_eq!(pages.summary(), "Showing 1 to 50 of 120 results");
    }

    #[test]
    fn test_next_clamps_at_last_page() {
        let pages = Pagination::new(120, 50).next().next();
        assert_eq!(pages.current_page(), 3);
        assert_eq!(pages.summary(), "Showing 101 to 120 of 120 results");
        assert!(!pages.has_next());
        assert_eq!(pages.next().current_page(), 3);
    }

    #[test]
    fn test_previous_clamps_at_first_page() {
        let pages = Pagination::new(120, 50);
        assert!(!pages.has_previous());
        assert_eq!(pages.previous().current_page(), 1);
    }

    #[test]
    fn test_default_config_is_single_page() {
        let pages = Pagination::new(50, DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.next(), pages);
    }

    #[test]
    fn test_empty_sequence() {
        let pages = Pagination::new(0, 50);
        assert_eq!(pages.total_pages(), 0);
        assert_eq!(pages.next().current_page(), 1);
        assert_eq!(pages.summary(), "Showing 0 to 0 of 0 results");
        assert!(pages.slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_zero_items_per_page_treated_as_one() {
        let pages = Pagination::new(3, 0);
        assert_eq!(pages.items_per_page(), 1);
        assert_eq!(pages.total_pages(), 3);
    }

    #[test]
    fn test_go_to_and_slice() {
        let items: Vec<u32> = (0..25).collect();
        let pages = Pagination::new(items.len(), 10).go_to(3);
        assert_eq!(pages.slice(&items), &[20, 21, 22, 23, 24]);
        assert_eq!(pages.go_to(99).current_page(), 3);
        assert_eq!(pages.go_to(0).current_page(), 1);
    }
}
