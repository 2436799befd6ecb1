//! Runtime value types for record fields.
//!
//! A [`Value`] is the content of one field of a [`Record`](crate::Record):
//! strings, numbers, booleans, timestamps, or nothing at all. Nested
//! documents are carried as [`Value::Map`] so they can be addressed with
//! dot-paths.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Owned value of a single record field.
///
/// Values round-trip through `serde_json::Value`; timestamps serialize as
/// RFC 3339 strings.
///
/// # Example
///
/// ```
/// use ledgerly_query::{Number, Value};
///
/// let price = Value::from(19.5);
/// assert_eq!(price.as_number(), Some(Number::F64(19.5)));
/// assert!(Value::from("Widget").is_string());
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Field present but empty (`null`).
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Point in time.
    Timestamp(Timestamp),
    /// Array value. Never a search or sort candidate on its own.
    List(Vec<Value>),
    /// Nested document, addressed with dot-paths.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the field holds text.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Whether the field holds a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Whether the field holds an instant.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    /// Whether the field holds a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// The text, for `String` fields.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, for `Number` fields.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The instant, for `Timestamp` fields. Strings are not parsed; see
    /// [`Value::as_instant`].
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// The flag, for `Bool` fields.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the nested document, if present.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Interprets this value as an instant.
    ///
    /// Timestamps are returned as-is. Strings are parsed with
    /// [`Timestamp::parse`], since remote stores commonly ship dates as
    /// ISO strings. Everything else has no instant.
    pub fn as_instant(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            Value::String(s) => Timestamp::parse(s).ok(),
            _ => None,
        }
    }

    /// Equality used by filters: numbers compare across representations.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
            (a, b) => a == b,
        }
    }

    /// Returns the name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

/// A field number, kept in the representation the store delivered.
///
/// Integers stay exact (`I64` or `U64`) so ids and counts never lose
/// precision; everything else is `F64`. Mixed integer comparisons are
/// exact, any comparison involving a float goes through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer that fits `i64`.
    I64(i64),
    /// Integer above `i64::MAX`, or built from an unsigned type.
    U64(u64),
    /// Anything with a fraction or exponent.
    F64(f64),
}

impl Number {
    /// Lossy `f64` view, used for ranges and float comparisons.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Numeric comparison across representations.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(cmp_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(cmp_signed_unsigned(b, a).reverse()),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    /// Total order used for sorting: NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        if let Some(ordering) = self.compare(other) {
            return ordering;
        }
        match (self.to_f64().is_nan(), other.to_f64().is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Ordering::Equal,
        }
    }
}

fn cmp_signed_unsigned(a: i64, b: u64) -> Ordering {
    if a < 0 {
        Ordering::Less
    } else {
        (a as u64).cmp(&b)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// An instant, stored as milliseconds since the Unix epoch (UTC).
///
/// Timezone-agnostic and ordered by instant. Convert from `chrono` types
/// with [`Timestamp::from_datetime`] and [`Timestamp::from_date`], or parse
/// the string forms remote stores usually return.
///
/// # Example
///
/// ```
/// use ledgerly_query::Timestamp;
///
/// let a = Timestamp::parse("2024-01-01").unwrap();
/// let b = Timestamp::parse("2024-01-01T12:00:00Z").unwrap();
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimestampRepr", into = "String")]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// From epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// From epoch seconds.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Epoch milliseconds.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Creates a timestamp from a UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }

    /// Creates a timestamp at midnight UTC of the given day.
    pub fn from_date(date: NaiveDate) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        Timestamp(midnight.and_utc().timestamp_millis())
    }

    /// Creates a timestamp at the last millisecond of the given day (UTC).
    pub fn end_of_day(date: NaiveDate) -> Self {
        Timestamp(Self::from_date(date).0.saturating_add(86_400_000 - 1))
    }

    /// Converts back to a UTC datetime, if in chrono's supported range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    /// Formats as RFC 3339, falling back to raw milliseconds out of range.
    pub fn to_rfc3339(self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            None => self.0.to_string(),
        }
    }

    /// Parses a date or datetime string.
    ///
    /// Accepted forms: RFC 3339 (`2024-01-31T10:00:00Z`, with any offset),
    /// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (UTC, optional
    /// fraction), and `YYYY-MM-DD` (midnight UTC).
    pub fn parse(text: &str) -> Result<Timestamp> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Timestamp::from_datetime(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Timestamp::from_datetime(naive.and_utc()));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Timestamp::from_date(date));
        }
        Err(QueryError::InvalidTimestamp(text.to_string()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::from_datetime(dt)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_rfc3339()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(i64),
    Text(String),
}

impl TryFrom<TimestampRepr> for Timestamp {
    type Error = QueryError;

    fn try_from(repr: TimestampRepr) -> Result<Self> {
        match repr {
            TimestampRepr::Millis(ms) => Ok(Timestamp(ms)),
            TimestampRepr::Text(text) => Timestamp::parse(&text),
        }
    }
}

// Conversions into Value

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n.into())
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::Timestamp(dt.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(Number::I64(n)) => serde_json::Value::from(n),
            Value::Number(Number::U64(n)) => serde_json::Value::from(n),
            Value::Number(Number::F64(n)) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Timestamp(t) => serde_json::Value::String(t.to_rfc3339()),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_type_checks() {
        assert!(Value::from("test").is_string());
        assert!(Value::from(42i64).is_number());
        assert!(Value::Timestamp(Timestamp(0)).is_timestamp());
        assert!(Value::from(true).is_bool());
        assert!(Value::Null.is_null());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42i64).as_number(), Some(Number::I64(42)));
        assert_eq!(
            Value::Timestamp(Timestamp(1000)).as_timestamp(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::from(true).as_bool(), Some(true));

        // other types do not coerce
        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1i64).as_str(), None);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn number_total_cmp_puts_nan_last() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_eq!(
            Number::F64(f64::NAN).total_cmp(Number::F64(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            Number::I64(3).total_cmp(Number::F64(f64::NAN)),
            Ordering::Less
        );
    }

    #[test]
    fn loosely_equals_crosses_number_types() {
        assert!(Value::from(10i64).loosely_equals(&Value::from(10.0)));
        assert!(!Value::from(10i64).loosely_equals(&Value::from("10")));
        assert!(Value::from("paid").loosely_equals(&Value::from("paid")));
    }

    #[test]
    fn timestamp_parse_forms() {
        let day = Timestamp::parse("2024-01-31").unwrap();
        assert_eq!(day.to_rfc3339(), "2024-01-31T00:00:00Z");

        let spaced = Timestamp::parse("2024-01-31 10:30:00").unwrap();
        let rfc = Timestamp::parse("2024-01-31T10:30:00Z").unwrap();
        assert_eq!(spaced, rfc);

        let offset = Timestamp::parse("2024-01-31T12:30:00+02:00").unwrap();
        assert_eq!(offset, rfc);

        assert!(matches!(
            Timestamp::parse("last tuesday"),
            Err(QueryError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn end_of_day_is_last_millisecond() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let end = Timestamp::end_of_day(date);
        let next = Timestamp::from_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end.as_millis() + 1, next.as_millis());
    }

    #[test]
    fn from_secs_saturates() {
        assert_eq!(Timestamp::from_secs(90).as_millis(), 90_000);
        assert_eq!(Timestamp::from_secs(i64::MAX).as_millis(), i64::MAX);
        assert_eq!(Timestamp::from_secs(i64::MIN).as_millis(), i64::MIN);
    }

    #[test]
    fn as_instant_parses_strings() {
        assert_eq!(
            Value::from("2024-01-01").as_instant(),
            Timestamp::parse("2024-01-01").ok()
        );
        assert_eq!(Value::from("soon").as_instant(), None);
        assert_eq!(Value::from(5i64).as_instant(), None);
    }

    #[test]
    fn json_round_trip_keeps_shape() {
        let json = json!({"name": "Model \"X\"", "price": 9.5, "qty": 3, "tags": ["a"], "meta": null});
        let value = Value::from(json.clone());
        let map = value.as_map().unwrap();
        assert_eq!(map["qty"], Value::Number(Number::I64(3)));
        assert_eq!(map["meta"], Value::Null);
        assert_eq!(serde_json::Value::from(value), json);
    }

    #[test]
    fn timestamp_serde_accepts_text_and_millis() {
        let from_text: Timestamp = serde_json::from_str("\"2024-01-01\"").unwrap();
        let from_millis: Timestamp = serde_json::from_str("1704067200000").unwrap();
        assert_eq!(from_text, from_millis);
        assert_eq!(
            serde_json::to_string(&from_text).unwrap(),
            "\"2024-01-01T00:00:00Z\""
        );
    }
}
