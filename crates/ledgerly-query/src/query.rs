//! Query specification and pipeline.
//!
//! The [`QuerySpec`] struct provides a fluent builder API for describing one
//! evaluation (search, filters, sort, page) and methods for running it
//! against a collection:
//!
//! ```text
//! records ─▶ search ─▶ filter ─▶ sort ─▶ paginate ─▶ PageResult
//!                                   └──▶ select (export input, no paging)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher;
use crate::ordering::{self, Dir, SortKey};
use crate::paginate::{self, PageResult};
use crate::predicate::{self, DateRange, FilterSpec, NumericRange};
use crate::traits::Seekable;
use crate::value::{Timestamp, Value};

/// Page size used when a spec does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// The caller's combined search, filter, sort and page configuration.
///
/// A plain value rebuilt by the caller on every change. Every field has a
/// default, so it deserializes from a partial payload such as
/// `{"search": "lamp", "page": 2}`.
///
/// # Example
///
/// ```
/// use ledgerly_query::{QuerySpec, Record};
///
/// let products: Vec<Record> = (1..=25)
///     .map(|i| Record::new().with("name", format!("Lamp {i}")).with("price", i as i64))
///     .collect();
///
/// let spec = QuerySpec::new()
///     .search("lamp")
///     .numeric_between("price", 5.0, 20.0)
///     .sort_desc("price")
///     .page(2)
///     .page_size(10);
///
/// let page = spec.run(&products).unwrap();
/// assert_eq!(page.total_items, 16);
/// assert_eq!(page.items.len(), 6);
/// assert!(page.has_prev_page);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySpec {
    /// Free-text search term; empty means no search.
    pub search: String,
    /// Dot-paths to search; empty means every top-level string field.
    pub search_fields: Vec<String>,
    /// Conjunction of filters.
    pub filters: FilterSpec,
    /// Sort keys, primary first; empty keeps collection order.
    pub sort: Vec<SortKey>,
    /// Requested page, 1-based.
    #[serde(default = "default_page")]
    pub page: usize,
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        QuerySpec {
            search: String::new(),
            search_fields: Vec::new(),
            filters: FilterSpec::new(),
            sort: Vec::new(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl QuerySpec {
    /// Creates a spec that returns the first page of the whole collection.
    pub fn new() -> Self {
        QuerySpec::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Restricts search to the given dot-paths.
    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Replaces the filter set.
    pub fn filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    /// Adds an equality filter.
    pub fn equals(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters = self.filters.equals(field, value);
        self
    }

    /// Adds an inclusive date-range filter.
    pub fn date_between(mut self, field: &str, start: Timestamp, end: Timestamp) -> Self {
        self.filters = self.filters.date_between(field, start, end);
        self
    }

    /// Adds a date-range filter with independently optional bounds.
    pub fn date_range(mut self, field: &str, range: DateRange) -> Self {
        self.filters = self.filters.date_range(field, range);
        self
    }

    /// Adds an inclusive numeric-range filter.
    pub fn numeric_between(mut self, field: &str, min: f64, max: f64) -> Self {
        self.filters = self.filters.numeric_between(field, min, max);
        self
    }

    /// Adds a numeric-range filter with independently optional bounds.
    pub fn numeric_range(mut self, field: &str, range: NumericRange) -> Self {
        self.filters = self.filters.numeric_range(field, range);
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Appends a sort key.
    pub fn sort_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort.push(SortKey::new(field, dir));
        self
    }

    /// Appends an ascending sort key.
    pub fn sort_asc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Asc)
    }

    /// Appends a descending sort key.
    pub fn sort_desc(self, field: &str) -> Self {
        self.sort_by(field, Dir::Desc)
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Sets the requested page (1-based; clamped when run).
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests a single record against the search term and filters.
    pub fn matches<T: Seekable + ?Sized>(&self, record: &T) -> bool {
        matcher::search_matches(record, &self.search, &self.search_fields)
            && self.filters.matches(record)
    }

    /// Runs search, filter and sort; no paging.
    ///
    /// This is the full result set a table is built from, and what an
    /// export should receive.
    pub fn select<T: Seekable + Clone>(&self, records: &[T]) -> Vec<T> {
        let found = matcher::search(records, &self.search, &self.search_fields);
        let filtered = predicate::apply_filters(&found, &self.filters);
        ordering::sort_by_keys(&filtered, &self.sort)
    }

    /// Runs the whole pipeline and returns the requested page.
    pub fn run<T: Seekable + Clone>(&self, records: &[T]) -> Result<PageResult<T>> {
        paginate::paginate(&self.select(records), self.page, self.page_size)
    }

    /// Counts the records that pass search and filters.
    pub fn count<T: Seekable>(&self, records: &[T]) -> usize {
        records.iter().filter(|r| self.matches(*r)).count()
    }
}
