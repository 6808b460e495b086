//! Pagination engine and navigation window

use serde::{Deserialize, Serialize};

/// Default width of the navigation window, ellipses excluded
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One page of a filtered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Clamped to `[1, total_pages]`
    pub current_page: usize,
    /// At least 1, even for an empty sequence
    pub total_pages: usize,
}

/// One entry of the navigation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// `ceil(len / page_size)`, never below 1
///
/// A page size of 0 is treated as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice out the requested page, clamping the page number into range
pub fn paginate<T: Clone>(filtered: &[T], page_size: usize, requested_page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let current_page = requested_page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(filtered.len());
    let items = filtered.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        current_page,
        total_pages,
    }
}

/// Page numbers to render, with first and last pinned
///
/// When everything fits, all pages are listed. Otherwise a band of
/// `max_visible - 2` pages is centred on `current`, shifted to stay inside
/// `[2, total - 1]`, and an ellipsis marks each gap to a pinned end.
///
/// ```
/// use shared::directory::{PageLink::*, window_pages};
///
/// assert_eq!(
///     window_pages(6, 12, 5),
///     vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
/// );
/// ```
pub fn window_pages(current: usize, total: usize, max_visible: usize) -> Vec<PageLink> {
    let total = total.max(1);
    if total <= max_visible.max(2) {
        return (1..=total).map(PageLink::Page).collect();
    }

    let current = current.clamp(1, total);
    let band = max_visible.saturating_sub(2).max(1);

    let mut start = current.saturating_sub((band - 1) / 2).max(2);
    let mut end = start + band - 1;
    if end > total - 1 {
        end = total - 1;
        start = (end + 1 - band).max(2);
    }

    let mut links = Vec::with_capacity(band + 4);
    links.push(PageLink::Page(1));
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}

#[cfg(test)]
mod tests {
    use super::PageLink::{Ellipsis, Page as P};
    use super::*;

    fn pages(links: &[PageLink]) -> Vec<usize> {
        links
            .iter()
            .filter_map(|l| match l {
                PageLink::Page(n) => Some(*n),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_twenty_three_records_page_size_ten() {
        let items: Vec<u32> = (0..23).collect();
        let first = paginate(&items, 10, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 10);

        let last = paginate(&items, 10, 3);
        assert_eq!(last.items, vec![20, 21, 22]);
    }

    #[test]
    fn test_pages_cover_every_item_once() {
        for len in [0usize, 1, 9, 10, 11, 23, 100] {
            for size in [1usize, 3, 10, 12] {
                let items: Vec<usize> = (0..len).collect();
                let total = total_pages(len, size);
                assert_eq!(total, len.div_ceil(size).max(1));

                let joined: Vec<usize> = (1..=total)
                    .flat_map(|p| paginate(&items, size, p).items)
                    .collect();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn test_requested_page_is_clamped() {
        let items: Vec<u32> = (0..15).collect();
        let page = paginate(&items, 10, 0);
        assert_eq!(page.current_page, 1);

        let page = paginate(&items, 10, 99);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_empty_sequence_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 10, 4);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_size() {
        let items = vec!['a', 'b'];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec!['b']);
    }

    #[test]
    fn test_window_fits() {
        assert_eq!(window_pages(1, 1, 5), vec![P(1)]);
        assert_eq!(window_pages(2, 5, 5), vec![P(1), P(2), P(3), P(4), P(5)]);
        assert_eq!(window_pages(1, 0, 5), vec![P(1)]);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(
            window_pages(6, 12, 5),
            vec![P(1), Ellipsis, P(5), P(6), P(7), Ellipsis, P(12)]
        );
    }

    #[test]
    fn test_window_edges_stay_full() {
        assert_eq!(
            window_pages(1, 12, 5),
            vec![P(1), P(2), P(3), P(4), Ellipsis, P(12)]
        );
        assert_eq!(
            window_pages(3, 12, 5),
            vec![P(1), P(2), P(3), P(4), Ellipsis, P(12)]
        );
        assert_eq!(
            window_pages(12, 12, 5),
            vec![P(1), Ellipsis, P(9), P(10), P(11), P(12)]
        );
        assert_eq!(
            window_pages(4, 6, 5),
            vec![P(1), Ellipsis, P(3), P(4), P(5), P(6)]
        );
    }

    #[test]
    fn test_window_properties() {
        for max_visible in 0..=8 {
            for total in 1..=20 {
                for current in 1..=total {
                    let links = window_pages(current, total, max_visible);
                    let nums = pages(&links);

                    assert_eq!(nums.first(), Some(&1));
                    assert_eq!(nums.last(), Some(&total));
                    assert!(nums.iter().all(|n| (1..=total).contains(n)));
                    assert!(nums.windows(2).all(|w| w[0] < w[1]));
                    assert!(
                        links
                            .windows(2)
                            .all(|w| !(w[0] == Ellipsis && w[1] == Ellipsis))
                    );
                    if total > max_visible.max(2) && current > 1 && current < total {
                        assert!(nums.contains(&current));
                    }
                    assert_eq!(window_pages(current, total, max_visible), links);
                }
            }
        }
    }

    #[test]
    fn test_page_link_serde() {
        let json = serde_json::to_string(&vec![P(1), Ellipsis]).unwrap();
        assert_eq!(json, r#"[{"type":"page","page":1},{"type":"ellipsis"}]"#);
    }
}
