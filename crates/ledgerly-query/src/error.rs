//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when building or running a query.
///
/// The engine is total over well-formed input: empty collections, empty
/// search terms, unknown fields and out-of-range page numbers are all
/// normalized rather than reported. Only the cases below are errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Page size must be at least one.
    #[error("invalid page size {page_size}: page size must be positive")]
    InvalidPageSize { page_size: usize },

    /// A string could not be interpreted as a date or timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
