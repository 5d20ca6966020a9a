/// Rows shown per page.
pub const PAGE_SIZE: usize = 20;

/// One entry in the compressed page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A navigable 1-based page number.
    Page(usize),
    /// An ellipsis standing in for a run of hidden pages.
    Gap,
}

/// The visible slice for a 0-based `page`, clamped to the available
/// rows. Pages past the end are empty, not an error — navigation
/// clamping is the caller's job.
pub fn page_slice<T>(view: &[T], page: usize, page_size: usize) -> &[T] {
    let start = match page.checked_mul(page_size) {
        Some(start) if start < view.len() => start,
        _ => return &[],
    };
    let end = view.len().min(start + page_size);
    &view[start..end]
}

pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    row_count.div_ceil(page_size)
}

/// Compressed page strip around a 1-based `current_page`.
///
/// Page 1 and the last page are always shown, with up to two pages on
/// each side of the current one. Near either edge the window widens to
/// five consecutive pages rather than leaving a one-page gap, and an
/// ellipsis is only emitted where the gap is genuine (more than one
/// hidden page).
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total_pages);

    let mut start = current.saturating_sub(2).max(1);
    let mut end = (current + 2).min(total_pages);
    if current <= 3 {
        end = total_pages.min(5);
    }
    if current + 2 >= total_pages {
        start = total_pages.saturating_sub(4).max(1);
    }

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Gap);
        }
    }
    for page in start..=end {
        items.push(PageItem::Page(page));
    }
    if end < total_pages {
        if end + 1 < total_pages {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(total_pages));
    }
    items
}
