//! Pagination window rendered under every register table.

use serde::Serialize;

/// Page size used by every register unless a caller overrides it.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Builds the page-number window: edge pages, a window around the current
/// page, and `None` gaps where pages are elided.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One rendered page of items plus the pagination window for the template.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
        }
    }

    /// Builds a page from a total item count using the default page size.
    pub fn from_total(items: Vec<T>, current_page: usize, total_items: usize) -> Self {
        Self::new(
            items,
            current_page,
            total_items.div_ceil(DEFAULT_ITEMS_PER_PAGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pages_when_empty() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 1, 0);
        assert!(paginated.pages.is_empty());
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn test_small_set_lists_every_page() {
        let paginated: Paginated<i32> = Paginated::new(vec![1, 2, 3], 1, 3);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_large_set_elides_middle() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 10, 40);
        assert!(paginated.pages.contains(&None));
        assert!(paginated.pages.contains(&Some(1)));
        assert!(paginated.pages.contains(&Some(10)));
        assert!(paginated.pages.contains(&Some(40)));
    }

    #[test]
    fn test_zero_page_clamped_to_first() {
        let paginated: Paginated<i32> = Paginated::new(vec![], 0, 5);
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn test_from_total_rounds_up() {
        let paginated: Paginated<i32> = Paginated::from_total(vec![], 1, 41);
        // 41 items at 20 per page -> 3 pages.
        assert_eq!(paginated.pages.last(), Some(&Some(3)));
    }
}
