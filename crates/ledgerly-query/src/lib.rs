//! Ledgerly Query - search, filter, sort and paginate in-memory record
//! collections.
//!
//! The engine turns a full collection plus a caller's [`QuerySpec`] into the
//! page a table shows. It supports:
//!
//! - Free-text search across all string fields or a chosen set of dot-paths
//! - Filters: equality, inclusive date ranges, inclusive numeric ranges
//! - Stable multi-key ordering with unknown values always last
//! - Pagination with clamped page numbers and a page-number window
//!
//! Every stage is a pure function from an input sequence to a new sequence:
//! nothing is mutated, nothing is cached, and nothing is logged.
//!
//! # Quick Start
//!
//! ```rust
//! use ledgerly_query::{QuerySpec, Record};
//!
//! let orders = vec![
//!     Record::new().with("customer", "Ada").with("status", "paid").with("total", 120.0),
//!     Record::new().with("customer", "Grace").with("status", "pending").with("total", 80.0),
//!     Record::new().with("customer", "Alan").with("status", "paid").with("total", 45.0),
//! ];
//!
//! let spec = QuerySpec::new()
//!     .equals("status", "paid")
//!     .sort_asc("total")
//!     .page_size(10);
//!
//! let page = spec.run(&orders).unwrap();
//! assert_eq!(page.total_items, 2);
//! assert_eq!(page.items[0].get("customer").and_then(|v| v.as_str()), Some("Alan"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Search ─▶ Filter ─▶ Sort ─▶ Paginate
//! ```
//!
//! Each stage may also be used on its own: [`search`], [`apply_filters`],
//! [`sort`] / [`sort_by_keys`], [`paginate`] and [`page_window`].
//!
//! # Missing Values
//!
//! A field is missing when it is absent from the record, when a dot-path
//! cannot be followed, or when it holds `null`. The same rule applies in
//! every stage:
//!
//! | Stage | Missing field |
//! |-------|---------------|
//! | Search | never a hit |
//! | Filter | fails any active predicate on it |
//! | Sort | placed last, ascending or descending |
//!
//! # Records
//!
//! Stages accept any `T: Seekable + Clone`, which covers owned [`Record`]s,
//! borrowed `&Record`s, and caller types wrapping a record.

mod error;
mod matcher;
mod ordering;
mod paginate;
pub mod path;
mod predicate;
mod query;
mod record;
mod traits;
mod value;

// Re-export public API
pub use error::{QueryError, Result};
pub use matcher::{matched_fields, search, search_matches};
pub use ordering::{
    collation_key, compare_by_keys, compare_present_last, compare_values, sort, sort_by_keys, Dir,
    SortKey,
};
pub use paginate::{page_window, paginate, total_pages, PageResult};
pub use predicate::{apply_filters, DateRange, FilterSpec, NumericRange, Predicate};
pub use query::{QuerySpec, DEFAULT_PAGE_SIZE};
pub use record::Record;
pub use traits::Seekable;
pub use value::{Number, Timestamp, Value};
