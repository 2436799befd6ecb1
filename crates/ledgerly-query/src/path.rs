//! Dot-path field resolution shared by every stage.
//!
//! All components look fields up through [`resolve`], so "missing" means
//! the same thing for search, filters, sorting and export.

use crate::record::Record;
use crate::value::Value;

/// Resolves a dot-path such as `"customer.address.city"` against a record.
///
/// Returns `None` when:
/// - any segment is absent,
/// - an intermediate segment is not a nested document,
/// - the final value is `Null`.
///
/// An empty path never resolves.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next().filter(|s| !s.is_empty())?;
    let mut current = record.field(first)?;

    for segment in segments {
        current = current.as_map()?.get(segment)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
