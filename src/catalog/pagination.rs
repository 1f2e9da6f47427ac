use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pages shown on each side of the current one in the pagination bar
const WINDOW: usize = 2;

/// One page of a filtered listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages
    pub total: usize,
    /// 1-indexed
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Entry of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

impl<T> Page<T> {
    /// Assemble page metadata around items that were already sliced
    pub fn from_parts(items: Vec<T>, total: usize, page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = normalize_page_size(page_size);
        let offset = (page - 1).saturating_mul(page_size);

        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total.div_ceil(page_size),
            has_next: offset.saturating_add(page_size) < total,
            has_prev: offset > 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }

    /// 1-indexed positions of the first and last item shown, `(0, 0)` for an empty page
    pub fn display_range(&self) -> (usize, usize) {
        if self.items.is_empty() {
            return (0, 0);
        }
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .saturating_add(1);
        (start, start.saturating_add(self.items.len() - 1))
    }

    /// Page numbers to render, collapsing distant ranges into ellipses
    pub fn visible_pages(&self) -> Vec<PageLink> {
        visible_pages(self.page, self.total_pages)
    }
}

/// Slice `entities` into the requested page.
///
/// Pages below 1 are treated as 1 and a zero page size falls back to
/// [`DEFAULT_PAGE_SIZE`]. Asking past the end yields an empty page.
pub fn paginate<T: Clone>(entities: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = normalize_page_size(page_size);
    let offset = (page - 1).saturating_mul(page_size);

    let items = entities
        .iter()
        .skip(offset)
        .take(page_size)
        .cloned()
        .collect();

    Page::from_parts(items, entities.len(), page, page_size)
}

/// First page, a window around `page`, last page; gaps become ellipses
pub fn visible_pages(page: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let page = page.clamp(1, total_pages);
    let mut links = vec![PageLink::Number(1)];

    if page > WINDOW + 2 {
        links.push(PageLink::Ellipsis);
    }

    let first = page.saturating_sub(WINDOW).max(2);
    let last = (page + WINDOW).min(total_pages.saturating_sub(1));
    links.extend((first..=last).map(PageLink::Number));

    if page + WINDOW + 1 < total_pages {
        links.push(PageLink::Ellipsis);
    }
    if total_pages > 1 {
        links.push(PageLink::Number(total_pages));
    }

    links
}

fn normalize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Number};

    fn numbers(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(&numbers(25), 3, 10);

        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn empty_collection() {
        let page = paginate::<u32>(&[], 1, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.display_range(), (0, 0));
    }

    #[test]
    fn first_page_has_next_only() {
        let page = paginate(&numbers(25), 1, 10);

        assert_eq!(page.items, numbers(10));
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.display_range(), (1, 10));
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let page = paginate(&numbers(5), 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn zero_page_size_uses_default() {
        let page = paginate(&numbers(25), 1, 0);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn past_the_end_is_empty_not_an_error() {
        let page = paginate(&numbers(5), 4, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn display_range_on_last_page() {
        let page = paginate(&numbers(25), 3, 10);
        assert_eq!(page.display_range(), (21, 25));
    }

    #[test]
    fn display_range_saturates_on_absurd_page() {
        let page = Page::from_parts(vec![1], 1, usize::MAX, 10);
        assert_eq!(page.display_range(), (usize::MAX, usize::MAX));
    }

    #[test]
    fn few_pages_have_no_ellipsis() {
        assert_eq!(visible_pages(1, 1), vec![Number(1)]);
        assert_eq!(
            visible_pages(2, 4),
            vec![Number(1), Number(2), Number(3), Number(4)]
        );
    }

    #[test]
    fn ellipses_around_window() {
        assert_eq!(
            visible_pages(10, 20),
            vec![
                Number(1),
                Ellipsis,
                Number(8),
                Number(9),
                Number(10),
                Number(11),
                Number(12),
                Ellipsis,
                Number(20),
            ]
        );
    }

    #[test]
    fn window_touching_start() {
        assert_eq!(
            visible_pages(1, 10),
            vec![Number(1), Number(2), Number(3), Ellipsis, Number(10)]
        );
        assert_eq!(
            visible_pages(4, 10),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Number(5),
                Number(6),
                Ellipsis,
                Number(10),
            ]
        );
    }

    #[test]
    fn window_touching_end() {
        assert_eq!(
            visible_pages(10, 10),
            vec![Number(1), Ellipsis, Number(8), Number(9), Number(10)]
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let page = paginate(&numbers(25), 2, 10).map(|n| n * 2);
        assert_eq!(page.items[0], 22);
        assert_eq!(page.total, 25);
        assert!(page.has_next && page.has_prev);
    }
}
