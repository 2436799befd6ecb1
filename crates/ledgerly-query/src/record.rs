//! Records: one row of business data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path;
use crate::value::Value;

/// A single row: field name to [`Value`].
///
/// Records in one collection share a vocabulary, but nothing here assumes
/// any particular field exists. Absence is a normal state.
///
/// # Example
///
/// ```
/// use ledgerly_query::{Record, Value};
///
/// let order = Record::new()
///     .with("id", "ord-1")
///     .with("total", 120.5)
///     .with("customer", Record::new().with("name", "Ada"));
///
/// assert_eq!(order.get("customer.name"), Some(&Value::from("Ada")));
/// assert_eq!(order.get("customer.email"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a top-level field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Resolves a dot-path. See [`path::resolve`].
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::resolve(self, path)
    }

    /// Returns a top-level field without path resolution.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterates top-level fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON document. Returns `None` unless the
    /// document is an object.
    pub fn from_json(json: serde_json::Value) -> Option<Record> {
        match Value::from(json) {
            Value::Map(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    /// Builds a record from any serializable row type.
    pub fn from_serialize<T: Serialize>(row: &T) -> serde_json::Result<Option<Record>> {
        Ok(Record::from_json(serde_json::to_value(row)?))
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Map(record.fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_requires_object() {
        let record = Record::from_json(json!({"id": 1, "status": "paid"})).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.field("status"), Some(&Value::from("paid")));

        assert!(Record::from_json(json!([1, 2])).is_none());
        assert!(Record::from_json(json!("text")).is_none());
    }

    #[test]
    fn from_serialize_uses_serde_names() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Customer {
            full_name: String,
            loyalty_points: u32,
        }

        let record = Record::from_serialize(&Customer {
            full_name: "Grace".into(),
            loyalty_points: 40,
        })
        .unwrap()
        .unwrap();

        assert_eq!(record.get("fullName"), Some(&Value::from("Grace")));
        assert_eq!(record.get("loyaltyPoints"), Some(&Value::from(40i64)));
    }

    #[test]
    fn collect_from_pairs() {
        let record: Record = [("a", 1i64), ("b", 2i64)].into_iter().collect();
        assert_eq!(record.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let record = Record::new().with("name", "Widget").with("qty", 2i64);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "Widget", "qty": 2})
        );
    }
}
