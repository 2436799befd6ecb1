//! Composable record filters.
//!
//! A [`FilterSpec`] is a conjunction of [`Predicate`]s. Each predicate names
//! one field and tests it for equality, date-range membership or
//! numeric-range membership. A record missing the field never passes an
//! active predicate on it, while an empty spec passes everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{Number, Timestamp, Value};

/// A single filter on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Field equals the value (numbers compare across representations).
    Equals { field: String, value: Value },
    /// Field is an instant within the range, both bounds inclusive.
    DateRange { field: String, range: DateRange },
    /// Field is a number within the range, both bounds inclusive.
    NumericRange { field: String, range: NumericRange },
}

impl Predicate {
    /// The field this predicate reads.
    pub fn field(&self) -> &str {
        match self {
            Predicate::Equals { field, .. }
            | Predicate::DateRange { field, .. }
            | Predicate::NumericRange { field, .. } => field,
        }
    }

    /// Returns `false` for a criterion that constrains nothing: a range
    /// with neither bound, or an equality against null.
    pub fn is_active(&self) -> bool {
        match self {
            Predicate::Equals { value, .. } => !value.is_null(),
            Predicate::DateRange { range, .. } => !range.is_unbounded(),
            Predicate::NumericRange { range, .. } => !range.is_unbounded(),
        }
    }

    /// Evaluates this predicate against a resolved field value.
    ///
    /// An inactive predicate passes everything. Otherwise `None` (missing or
    /// null) never matches.
    pub fn matches(&self, field_value: Option<&Value>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(value) = field_value else {
            return false;
        };
        match self {
            Predicate::Equals { value: expected, .. } => value.loosely_equals(expected),
            Predicate::DateRange { range, .. } => {
                value.as_instant().is_some_and(|ts| range.contains(ts))
            }
            Predicate::NumericRange { range, .. } => {
                value.as_number().is_some_and(|n| range.contains(n))
            }
        }
    }

    /// Evaluates this predicate against a record.
    pub fn matches_record<T: Seekable + ?Sized>(&self, record: &T) -> bool {
        self.matches(record.lookup(self.field()))
    }
}

/// Inclusive instant range. Each bound is optional and applies on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

impl DateRange {
    /// Range between two instants, both inclusive.
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Range covering whole calendar days, from midnight of `start` to the
    /// last millisecond of `end` (UTC).
    pub fn whole_days(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange::between(Timestamp::from_date(start), Timestamp::end_of_day(end))
    }

    /// Returns `true` if `ts` lies within the range.
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start.map_or(true, |start| ts >= start) && self.end.map_or(true, |end| ts <= end)
    }

    /// Returns `true` if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Inclusive numeric range. Each bound is optional and applies on its own:
/// a `min` without a `max` means "at least `min`".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    /// Range between two bounds, both inclusive.
    pub fn between(min: f64, max: f64) -> Self {
        NumericRange {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns `true` if `n` lies within the range. NaN never does.
    pub fn contains(&self, n: Number) -> bool {
        let n = n.to_f64();
        if n.is_nan() {
            return false;
        }
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }

    /// Returns `true` if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A conjunction of predicates.
///
/// Evaluation order does not matter; every predicate must pass.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ledgerly_query::{apply_filters, FilterSpec, Record};
///
/// let orders = vec![
///     Record::new().with("status", "paid").with("total", 40.0).with("createdAt", "2024-01-05"),
///     Record::new().with("status", "paid").with("total", 400.0).with("createdAt", "2024-02-10"),
///     Record::new().with("status", "pending").with("total", 55.0),
/// ];
///
/// let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let jan_end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let spec = FilterSpec::new()
///     .equals("status", "paid")
///     .date_between_days("createdAt", jan, jan_end);
///
/// assert_eq!(apply_filters(&orders, &spec).len(), 1);
/// ```
///
/// Inactive predicates (see [`Predicate::is_active`]) are dropped on the way
/// in, whether added through the builders or deserialized from a payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Predicate>", into = "Vec<Predicate>")]
pub struct FilterSpec {
    predicates: Vec<Predicate>,
}

impl From<Vec<Predicate>> for FilterSpec {
    fn from(predicates: Vec<Predicate>) -> Self {
        predicates.into_iter().fold(FilterSpec::new(), FilterSpec::and)
    }
}

impl From<FilterSpec> for Vec<Predicate> {
    fn from(spec: FilterSpec) -> Self {
        spec.predicates
    }
}

impl FilterSpec {
    /// Creates an empty spec, which passes every record.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Adds a predicate. An inactive one is a no-op.
    pub fn and(mut self, predicate: Predicate) -> Self {
        if predicate.is_active() {
            self.predicates.push(predicate);
        }
        self
    }

    /// Adds an equality predicate. Equality against null is a no-op.
    pub fn equals(self, field: &str, value: impl Into<Value>) -> Self {
        self.and(Predicate::Equals {
            field: field.to_string(),
            value: value.into(),
        })
    }

    /// Adds an equality predicate if `value` is set; `None` is a no-op.
    pub fn equals_opt(self, field: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.equals(field, v),
            None => self,
        }
    }

    /// Adds a date-range predicate. An unbounded range is a no-op.
    pub fn date_range(self, field: &str, range: DateRange) -> Self {
        self.and(Predicate::DateRange {
            field: field.to_string(),
            range,
        })
    }

    /// Adds an inclusive `[start, end]` date-range predicate.
    pub fn date_between(self, field: &str, start: Timestamp, end: Timestamp) -> Self {
        self.date_range(field, DateRange::between(start, end))
    }

    /// Adds a predicate covering whole calendar days `start..=end`.
    pub fn date_between_days(self, field: &str, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range(field, DateRange::whole_days(start, end))
    }

    /// Adds a numeric-range predicate. An unbounded range is a no-op.
    pub fn numeric_range(self, field: &str, range: NumericRange) -> Self {
        self.and(Predicate::NumericRange {
            field: field.to_string(),
            range,
        })
    }

    /// Adds an inclusive `[min, max]` numeric-range predicate.
    pub fn numeric_between(self, field: &str, min: f64, max: f64) -> Self {
        self.numeric_range(field, NumericRange::between(min, max))
    }

    /// Combines two specs into one conjunction.
    pub fn merge(mut self, other: FilterSpec) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// Returns the predicates.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns `true` if the spec has no predicates (passes everything).
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Tests a single record.
    pub fn matches<T: Seekable + ?Sized>(&self, record: &T) -> bool {
        self.predicates.iter().all(|p| p.matches_record(record))
    }
}

/// Keeps the records that pass every predicate in `spec`, in input order.
pub fn apply_filters<T: Seekable + Clone>(records: &[T], spec: &FilterSpec) -> Vec<T> {
    if spec.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| spec.matches(*record))
        .cloned()
        .collect()
}
