//! Fixed-size page windows over an ordered sequence.
//!
//! [`paginate`] slices one page and reports the metadata a table footer
//! needs; [`page_window`] picks which page-number buttons to show. Both are
//! plain functions of their inputs. The page result is returned to the
//! caller and never stored anywhere else.

use serde::Serialize;

use crate::error::{QueryError, Result};

/// One page of records plus display metadata.
///
/// Invariants: `items.len() <= page_size`; every page except the last is
/// full; `current_page` is always within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Number of records across all pages.
    pub total_items: usize,
    /// Number of pages; zero for an empty collection.
    pub total_pages: usize,
    /// The page actually returned, after clamping.
    pub current_page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// A later page exists.
    pub has_next_page: bool,
    /// An earlier page exists.
    pub has_prev_page: bool,
}

impl<T> PageResult<T> {
    /// 1-based position of the first item on this page, or 0 when empty.
    pub fn start_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on this page, or 0 when empty.
    pub fn end_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.start_index() + self.items.len() - 1
        }
    }

    /// Footer text such as `"Showing 11-20 of 23"`.
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.start_index(),
            self.end_index(),
            self.total_items
        )
    }

    /// Returns `true` if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Transforms the items while keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
        }
    }
}

/// Returns the number of pages needed for `total_items`.
pub fn total_pages(total_items: usize, page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(QueryError::InvalidPageSize { page_size });
    }
    Ok(total_items.div_ceil(page_size))
}

/// Slices page `page` (1-based) of `page_size` records.
///
/// - `page < 1` is treated as page 1; a page past the end is clamped to
///   the last page, so a non-empty collection never yields an empty page.
/// - An empty collection yields zero pages, no items and `current_page` 1.
/// - `page_size` 0 is rejected with [`QueryError::InvalidPageSize`].
///
/// # Example
///
/// ```
/// use ledgerly_query::paginate;
///
/// let rows: Vec<u32> = (1..=23).collect();
/// let last = paginate(&rows, 3, 10).unwrap();
/// assert_eq!(last.items, vec![21, 22, 23]);
/// assert_eq!(last.total_pages, 3);
/// assert!(!last.has_next_page);
/// assert!(last.has_prev_page);
/// ```
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: usize) -> Result<PageResult<T>> {
    let total_items = records.len();
    let total_pages = total_pages(total_items, page_size)?;
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Ok(PageResult {
        items: records[start..end].to_vec(),
        total_items,
        total_pages,
        current_page,
        page_size,
        has_next_page: current_page < total_pages,
        has_prev_page: current_page > 1,
    })
}

/// Computes up to `window_size` consecutive page numbers around
/// `current_page` for rendering page buttons.
///
/// The run is centered on the current page (ties lean left) and shifted to
/// stay inside `1..=total_pages`. It never holds more than `total_pages`
/// numbers; zero pages or a zero window yield an empty run.
///
/// # Example
///
/// ```
/// use ledgerly_query::page_window;
///
/// assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
/// assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
/// assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
/// ```
pub fn page_window(current_page: usize, total_pages: usize, window_size: usize) -> Vec<usize> {
    if total_pages == 0 || window_size == 0 {
        return Vec::new();
    }
    let len = window_size.min(total_pages);
    let current = current_page.clamp(1, total_pages);

    let first = current
        .saturating_sub((len - 1) / 2)
        .max(1)
        .min(total_pages - len + 1);

    (first..first + len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn twenty_three_records_in_pages_of_ten() {
        let data = rows(23);

        let p1 = paginate(&data, 1, 10).unwrap();
        assert_eq!(p1.items.len(), 10);
        assert_eq!(p1.total_pages, 3);
        assert!(p1.has_next_page);
        assert!(!p1.has_prev_page);

        let p2 = paginate(&data, 2, 10).unwrap();
        assert_eq!(p2.items, (11..=20).collect::<Vec<_>>());

        let p3 = paginate(&data, 3, 10).unwrap();
        assert_eq!(p3.items, vec![21, 22, 23]);
        assert!(!p3.has_next_page);
        assert!(p3.has_prev_page);
        assert_eq!(p3.current_page, 3);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let data = rows(23);
        assert_eq!(paginate(&data, 0, 10).unwrap(), paginate(&data, 1, 10).unwrap());
    }

    #[test]
    fn page_past_end_clamps_to_last() {
        let data = rows(23);
        assert_eq!(
            paginate(&data, 53, 10).unwrap(),
            paginate(&data, 3, 10).unwrap()
        );
    }

    #[test]
    fn empty_collection() {
        let data: Vec<usize> = Vec::new();
        let page = paginate(&data, 4, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.current_page, 1);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
        assert_eq!(page.summary(), "Showing 0-0 of 0");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            paginate(&rows(3), 1, 0),
            Err(QueryError::InvalidPageSize { page_size: 0 })
        );
        assert!(total_pages(3, 0).is_err());
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let data = rows(20);
        let page = paginate(&data, 3, 10).unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn display_range() {
        let page = paginate(&rows(23), 2, 10).unwrap();
        assert_eq!(page.start_index(), 11);
        assert_eq!(page.end_index(), 20);
        assert_eq!(page.summary(), "Showing 11-20 of 23");
    }

    #[test]
    fn map_keeps_metadata() {
        let page = paginate(&rows(5), 2, 2).unwrap().map(|n| n * 10);
        assert_eq!(page.items, vec![30, 40]);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn serializes_camel_case() {
        let page = paginate(&rows(3), 1, 2).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalItems"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["currentPage"], 1);
    }

    #[test]
    fn window_centers_and_clamps() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(9, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(5, 10, 4), vec![4, 5, 6, 7]);
    }

    #[test]
    fn window_never_exceeds_total_pages() {
        assert_eq!(page_window(1, 2, 7), vec![1, 2]);
        assert_eq!(page_window(1, 1, 1), vec![1]);
    }

    #[test]
    fn window_handles_out_of_range_inputs() {
        assert!(page_window(1, 0, 5).is_empty());
        assert!(page_window(3, 10, 0).is_empty());
        assert_eq!(page_window(0, 10, 3), vec![1, 2, 3]);
        assert_eq!(page_window(99, 10, 3), vec![8, 9, 10]);
    }
}
