//! Free-text search over record fields.
//!
//! Search is a filter, never a reorder: the output keeps the input's
//! relative order.

use crate::traits::Seekable;
use crate::value::Value;

/// Keeps the records where any candidate field contains `term`.
///
/// - An empty or whitespace-only term returns the input unchanged.
/// - The term is trimmed and matched case-insensitively as a substring.
/// - With an empty `fields` list, every top-level string field is a
///   candidate. Otherwise exactly the listed dot-paths are candidates.
/// - Only string values are compared. A named field holding a number,
///   boolean or date never matches, so a price of `9` is not found by
///   searching `99` (or the other way round).
///
/// # Example
///
/// ```
/// use ledgerly_query::{search, Record};
///
/// let products = vec![
///     Record::new().with("name", "Desk Lamp").with("price", 99i64),
///     Record::new().with("name", "Office Chair").with("price", 9i64),
/// ];
///
/// let hits = search(&products, "LAMP", &[] as &[&str]);
/// assert_eq!(hits.len(), 1);
///
/// // Numbers are never substring-matched.
/// assert!(search(&products, "9", &["price"]).is_empty());
/// ```
pub fn search<T, S>(records: &[T], term: &str, fields: &[S]) -> Vec<T>
where
    T: Seekable + Clone,
    S: AsRef<str>,
{
    let needle = normalize_term(term);
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches_normalized(*record, &needle, fields))
        .cloned()
        .collect()
}

/// Tests a single record against a search term, with the same rules as
/// [`search`]. An empty term matches everything.
pub fn search_matches<T, S>(record: &T, term: &str, fields: &[S]) -> bool
where
    T: Seekable + ?Sized,
    S: AsRef<str>,
{
    let needle = normalize_term(term);
    needle.is_empty() || matches_normalized(record, &needle, fields)
}

/// Names the candidate fields that contain `term`, in candidate order.
///
/// Useful for highlighting hits in a table. Returns an empty list for an
/// empty term.
pub fn matched_fields<T, S>(record: &T, term: &str, fields: &[S]) -> Vec<String>
where
    T: Seekable + ?Sized,
    S: AsRef<str>,
{
    let needle = normalize_term(term);
    if needle.is_empty() {
        return Vec::new();
    }

    candidates(record, fields)
        .into_iter()
        .filter(|(_, value)| contains_folded(value, &needle))
        .map(|(name, _)| name)
        .collect()
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

fn matches_normalized<T, S>(record: &T, needle: &str, fields: &[S]) -> bool
where
    T: Seekable + ?Sized,
    S: AsRef<str>,
{
    if fields.is_empty() {
        record
            .record()
            .iter()
            .any(|(_, value)| contains_folded(value, needle))
    } else {
        fields.iter().any(|field| {
            record
                .lookup(field.as_ref())
                .is_some_and(|value| contains_folded(value, needle))
        })
    }
}

fn candidates<'a, T, S>(record: &'a T, fields: &[S]) -> Vec<(String, &'a Value)>
where
    T: Seekable + ?Sized,
    S: AsRef<str>,
{
    if fields.is_empty() {
        record
            .record()
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    } else {
        fields
            .iter()
            .filter_map(|field| {
                record
                    .lookup(field.as_ref())
                    .map(|value| (field.as_ref().to_string(), value))
            })
            .collect()
    }
}

fn contains_folded(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    const NO_FIELDS: &[&str] = &[];

    fn customers() -> Vec<Record> {
        vec![
            Record::new()
                .with("name", "Ada Lovelace")
                .with("email", "ada@example.com")
                .with("visits", 12i64),
            Record::new()
                .with("name", "Grace Hopper")
                .with("email", "grace@navy.mil")
                .with("address", Record::new().with("city", "Arlington")),
            Record::new()
                .with("name", "Alan Turing")
                .with("email", "alan@bletchley.uk")
                .with("address", Record::new().with("city", "Wilmslow")),
        ]
    }

    #[test]
    fn empty_term_is_identity() {
        let data = customers();
        assert_eq!(search(&data, "", NO_FIELDS), data);
        assert_eq!(search(&data, "   \t", &["name"]), data);
    }

    #[test]
    fn all_string_fields_by_default() {
        let data = customers();
        let hits = search(&data, "navy", NO_FIELDS);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("name"), Some(&Value::from("Grace Hopper")));
    }

    #[test]
    fn default_mode_ignores_nested_and_numeric() {
        let data = customers();
        // city lives under address, which is a map, not a string
        assert!(search(&data, "arlington", NO_FIELDS).is_empty());
        assert!(search(&data, "12", NO_FIELDS).is_empty());
    }

    #[test]
    fn explicit_fields_follow_dot_paths() {
        let data = customers();
        let hits = search(&data, "WILM", &["address.city"]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("name"), Some(&Value::from("Alan Turing")));
    }

    #[test]
    fn explicit_non_string_field_never_matches() {
        let data = customers();
        assert!(search(&data, "12", &["visits"]).is_empty());
    }

    #[test]
    fn term_is_trimmed_and_case_folded() {
        let data = customers();
        assert_eq!(
            search(&data, "  LOVELACE ", NO_FIELDS),
            search(&data, "lovelace", NO_FIELDS)
        );
    }

    #[test]
    fn preserves_input_order() {
        let data = customers();
        let hits = search(&data, "a", &["name"]);
        let names: Vec<_> = hits.iter().filter_map(|r| r.get("name")).collect();
        assert_eq!(
            names,
            vec![
                &Value::from("Ada Lovelace"),
                &Value::from("Grace Hopper"),
                &Value::from("Alan Turing"),
            ]
        );
    }

    #[test]
    fn works_on_borrowed_rows() {
        let data = customers();
        let refs: Vec<&Record> = data.iter().collect();
        let hits = search(&refs, "turing", &["name"]);
        assert!(std::ptr::eq(hits[0], &data[2]));
    }

    #[test]
    fn matched_fields_reports_hits() {
        let data = customers();
        assert_eq!(matched_fields(&data[0], "ada", NO_FIELDS), ["email", "name"]);
        assert_eq!(
            matched_fields(&data[1], "ARL", &["name", "address.city"]),
            ["address.city"]
        );
        assert!(matched_fields(&data[1], "", NO_FIELDS).is_empty());
    }

    #[test]
    fn single_record_predicate() {
        let data = customers();
        assert!(search_matches(&data[0], "", NO_FIELDS));
        assert!(search_matches(&data[0], "example", NO_FIELDS));
        assert!(!search_matches(&data[0], "example", &["name"]));
    }
}
