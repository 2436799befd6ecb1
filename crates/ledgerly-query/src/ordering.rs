//! Ordering types and the record comparator.
//!
//! Provides [`Dir`] for sort direction, [`SortKey`] for field-based
//! ordering, and the stable [`sort`] / [`sort_by_keys`] functions.
//!
//! Records without a value for the sort field always go last, in both
//! directions. Descending order flips the comparison of present values
//! only, never the placement of missing ones.

use std::cmp::Ordering;
use std::fmt;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{Timestamp, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Smallest, earliest or alphabetically first at the top.
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Largest, latest or alphabetically last at the top.
    #[serde(alias = "descending")]
    Desc,
}

impl Dir {
    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction, for header-click toggling.
    pub fn toggled(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Short name, as used in query payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ordering key: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The dot-path to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortKey {
    /// Creates a new ascending key for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Asc)
    }

    /// Creates a new descending key for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Desc)
    }

    /// Creates a new key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }

    /// Compares two records on this key, unknowns last.
    pub fn compare<T: Seekable + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        compare_present_last(a.lookup(&self.field), b.lookup(&self.field), self.dir)
    }
}

/// Compares two optional field values: present values are ordered by
/// [`compare_values`] in the given direction, and missing values go after
/// every present one regardless of direction.
pub fn compare_present_last(a: Option<&Value>, b: Option<&Value>, dir: Dir) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(compare_values(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order over present values.
///
/// - strings: collation order (see [`collation_key`]), raw text as tiebreak
/// - numbers: numeric, across integer and float representations
/// - timestamps: by instant, including strings that parse as one
/// - booleans: `false` before `true`
///
/// Values of different types are grouped by type (numbers, timestamps,
/// strings, booleans, lists, maps, null) so that a column with mixed types
/// still sorts deterministically. Lists and maps tie among themselves.
///
/// A date string such as `"2024-01-31T12:30:00+02:00"` counts as a
/// timestamp, so a date column sorts the way a date-range filter reads it.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (SortView::of(a), SortView::of(b)) {
        (SortView::Instant(a), SortView::Instant(b)) => a.cmp(&b),
        (SortView::Plain(Value::String(a)), SortView::Plain(Value::String(b))) => {
            compare_strings(a, b)
        }
        (SortView::Plain(Value::Number(a)), SortView::Plain(Value::Number(b))) => {
            a.total_cmp(*b)
        }
        (SortView::Plain(Value::Bool(a)), SortView::Plain(Value::Bool(b))) => a.cmp(b),
        (a, b) => a.rank().cmp(&b.rank()),
    }
}

/// A value as the comparator sees it.
enum SortView<'a> {
    Instant(Timestamp),
    Plain(&'a Value),
}

impl<'a> SortView<'a> {
    fn of(value: &'a Value) -> Self {
        match value.as_instant() {
            Some(t) => SortView::Instant(t),
            None => SortView::Plain(value),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortView::Instant(_) => 1,
            SortView::Plain(value) => type_rank(value),
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Timestamp(_) => 1,
        Value::String(_) => 2,
        Value::Bool(_) => 3,
        Value::List(_) => 4,
        Value::Map(_) => 5,
        Value::Null => 6,
    }
}

/// Language-neutral collation key: transliterated to ASCII and case-folded,
/// so `"émile"` sorts with `"Emile"` and before `"Frank"`.
pub fn collation_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Compares two records using a list of keys.
///
/// Uses the first key as the primary sort key, the second to break ties,
/// and so on. If all keys compare equal, returns `Equal`.
pub fn compare_by_keys<T: Seekable + ?Sized>(a: &T, b: &T, keys: &[SortKey]) -> Ordering {
    keys.iter()
        .map(|key| key.compare(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Returns a new sequence ordered by `field` in `dir`.
///
/// The sort is stable: records that compare equal keep their input order.
/// Records missing `field` are placed last in both directions.
///
/// # Example
///
/// ```
/// use ledgerly_query::{sort, Dir, Record, Value};
///
/// let rows = vec![
///     Record::new().with("name", "b").with("stock", 5i64),
///     Record::new().with("name", "a"),
///     Record::new().with("name", "c").with("stock", 9i64),
/// ];
///
/// let sorted = sort(&rows, "stock", Dir::Desc);
/// let names: Vec<_> = sorted.iter().map(|r| r.get("name").cloned()).collect();
/// assert_eq!(names, [Some(Value::from("c")), Some(Value::from("b")), Some(Value::from("a"))]);
/// ```
pub fn sort<T: Seekable + Clone>(records: &[T], field: &str, dir: Dir) -> Vec<T> {
    sort_by_keys(records, &[SortKey::new(field, dir)])
}

/// Returns a new sequence ordered by several keys; later keys break ties
/// of earlier ones. Stable, unknowns last per key.
pub fn sort_by_keys<T: Seekable + Clone>(records: &[T], keys: &[SortKey]) -> Vec<T> {
    let mut sorted = records.to_vec();
    if !keys.is_empty() {
        sorted.sort_by(|a, b| compare_by_keys(a, b, keys));
    }
    sorted
}
