//! Cell flattening shared by both export formats.
//!
//! A column is a dot-path resolved against each record. Missing paths and
//! nulls become an empty string in both formats, so every row has the same
//! field set and nothing ever renders as `null`.

use ledgerly_query::{Seekable, Value};

/// Text of a cell for delimited output.
///
/// Strings are written as-is, numbers and booleans in their plain form,
/// timestamps as RFC 3339, and nested lists or maps as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.to_f64().is_finite() => n.to_string(),
        Some(Value::Number(_)) => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Timestamp(ts)) => ts.to_rfc3339(),
        Some(nested @ (Value::List(_) | Value::Map(_))) => {
            serde_json::Value::from(nested.clone()).to_string()
        }
    }
}

/// Value of a cell for structured output.
///
/// Scalars keep their JSON type; missing values and non-finite numbers
/// become `""`. Nested lists and maps are flattened to the same compact
/// JSON text the delimited form writes, so every object stays single-level.
pub fn cell_json(value: Option<&Value>) -> serde_json::Value {
    match value {
        Some(nested @ (Value::List(_) | Value::Map(_))) => {
            serde_json::Value::String(cell_text(Some(nested)))
        }
        _ => match value.map(|v| serde_json::Value::from(v.clone())) {
            None | Some(serde_json::Value::Null) => serde_json::Value::String(String::new()),
            Some(json) => json,
        },
    }
}

/// Resolves `fields` against a record, in column order.
pub fn row_text<T, S>(record: &T, fields: &[S]) -> Vec<String>
where
    T: Seekable + ?Sized,
    S: AsRef<str>,
{
    fields
        .iter()
        .map(|field| cell_text(record.lookup(field.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_query::{Record, Timestamp};

    #[test]
    fn missing_and_null_are_empty() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_json(None), serde_json::json!(""));
        assert_eq!(cell_json(Some(&Value::Null)), serde_json::json!(""));
    }

    #[test]
    fn scalars() {
        assert_eq!(cell_text(Some(&Value::from(42i64))), "42");
        assert_eq!(cell_text(Some(&Value::from(9.5))), "9.5");
        assert_eq!(cell_text(Some(&Value::from(f64::NAN))), "");
        assert_eq!(cell_text(Some(&Value::from(true))), "true");
        assert_eq!(
            cell_text(Some(&Value::Timestamp(Timestamp::from_secs(0)))),
            "1970-01-01T00:00:00Z"
        );
        assert_eq!(cell_json(Some(&Value::from(42i64))), serde_json::json!(42));
        assert_eq!(cell_json(Some(&Value::from(f64::NAN))), serde_json::json!(""));
    }

    #[test]
    fn nested_values_as_compact_json() {
        let tags = Value::List(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(cell_text(Some(&tags)), r#"["a","b"]"#);
    }

    #[test]
    fn nested_values_flatten_identically_in_json() {
        let tags = Value::List(vec![Value::from("a"), Value::from(2i64)]);
        let address = Value::from(Record::new().with("city", "Paris"));
        for nested in [tags, address] {
            assert_eq!(
                cell_json(Some(&nested)),
                serde_json::Value::String(cell_text(Some(&nested)))
            );
        }
        assert_eq!(
            cell_json(Some(&Value::from(Record::new().with("city", "Paris")))),
            serde_json::json!(r#"{"city":"Paris"}"#)
        );
    }

    #[test]
    fn row_follows_field_order() {
        let record = Record::new()
            .with("b", "second")
            .with("a", "first")
            .with("nested", Record::new().with("x", 1i64));
        assert_eq!(
            row_text(&record, &["nested.x", "a", "gone", "b"]),
            ["1", "first", "", "second"]
        );
    }
}
