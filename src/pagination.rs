//! Fixed-size page windows over result slices.
use std::num::NonZeroUsize;

use serde::Serialize;

/// Items per listing page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(9) {
    Some(n) => n,
    None => unreachable!(),
};

/// `ceil(len / page_size)`; zero for an empty list.
#[must_use]
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Navigation state for one page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based.
    pub current_page: usize,
    /// Never less than 1, so an empty result displays as "page 1 of 1".
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Slice out page `current_page` (1-based). Out-of-range pages are clamped
/// into `[1, total_pages]`.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, current_page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let pages = total_pages(items.len(), page_size).max(1);
    let current = current_page.clamp(1, pages);

    let start = ((current - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    Page {
        items: &items[start..end],
        info: PageInfo {
            current_page: current,
            total_pages: pages,
            page_size: size,
            total_items: items.len(),
            has_previous: current > 1,
            has_next: current < pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_ten_items_page_size_nine() {
        let items: Vec<u32> = (1..=10).collect();
        let first = paginate(&items, DEFAULT_PAGE_SIZE, 1);
        assert_eq!(first.items.len(), 9);
        assert_eq!(first.info.total_pages, 2);
        assert!(!first.info.has_previous);
        assert!(first.info.has_next);

        let second = paginate(&items, DEFAULT_PAGE_SIZE, 2);
        assert_eq!(second.items, &[10]);
        assert!(second.info.has_previous);
        assert!(!second.info.has_next);
    }

    #[test]
    fn test_empty_is_one_page() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(total_pages(0, DEFAULT_PAGE_SIZE), 0);
        let page = paginate(&items, DEFAULT_PAGE_SIZE, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.info.total_pages, 1);
        assert_eq!(page.info.current_page, 1);
        assert!(!page.info.has_next);
    }

    #[test]
    fn test_pages_reconstruct_items() {
        for len in 0..30usize {
            let items: Vec<usize> = (0..len).collect();
            for n in 1..=7 {
                let page_size = size(n);
                let mut rebuilt = Vec::new();
                for p in 1..=total_pages(len, page_size) {
                    let page = paginate(&items, page_size, p);
                    assert!(page.items.len() <= n);
                    rebuilt.extend_from_slice(page.items);
                }
                assert_eq!(rebuilt, items, "len={len} size={n}");
            }
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, size(2), 0).info.current_page, 1);
        let last = paginate(&items, size(2), 99);
        assert_eq!(last.info.current_page, 3);
        assert_eq!(last.items, &[5]);
    }
}
