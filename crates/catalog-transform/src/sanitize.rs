//! Recursive value sanitization.
//!
//! Spreadsheet exports are full of NaN markers and empty cells; the
//! sanitizer strips them so that a key present in the output always carries
//! a meaningful value. Date/time cells are canonicalized to ISO-8601 text
//! here, which keeps the serialization boundary trivial.

use catalog_model::Value;

/// Sanitizes one value, returning `None` when it reduces to nothing.
///
/// - Objects drop entries whose sanitized value is absent; an object left
///   empty collapses to absent.
/// - Arrays drop absent elements; an array left empty collapses to absent,
///   so the assembler can skip attaching an empty child collection.
/// - NaN floats and nulls become absent.
/// - Timestamps are rendered to ISO-8601 text.
/// - Every other scalar passes through unchanged.
///
/// Pure and total; sanitizing an already-sanitized value is a no-op.
pub fn sanitize(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Float(f) if f.is_nan() => None,
        Value::Timestamp(ts) => Some(Value::Text(Value::format_timestamp(ts))),
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.into_iter().filter_map(sanitize).collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Array(cleaned))
            }
        }
        Value::Object(entries) => {
            let cleaned: std::collections::BTreeMap<String, Value> = entries
                .into_iter()
                .filter_map(|(key, value)| sanitize(value).map(|v| (key, v)))
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        scalar => Some(scalar),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn object(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn drops_null_and_nan_entries() {
        let input = object(vec![
            ("keep", Value::Int(1)),
            ("null", Value::Null),
            ("nan", Value::Float(f64::NAN)),
        ]);
        let expected = object(vec![("keep", Value::Int(1))]);
        assert_eq!(sanitize(input), Some(expected));
    }

    #[test]
    fn empty_list_collapses_to_absent() {
        let input = object(vec![
            ("id", Value::Int(7)),
            ("media", Value::Array(vec![Value::Null, Value::Float(f64::NAN)])),
        ]);
        let expected = object(vec![("id", Value::Int(7))]);
        assert_eq!(sanitize(input), Some(expected));
    }

    #[test]
    fn empty_object_collapses_to_absent() {
        let input = object(vec![
            ("id", Value::Int(7)),
            ("examiner", object(vec![("ExaminerID", Value::Null)])),
        ]);
        let expected = object(vec![("id", Value::Int(7))]);
        assert_eq!(sanitize(input), Some(expected));
    }

    #[test]
    fn timestamp_becomes_iso8601_text() {
        let ts = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            sanitize(Value::Timestamp(ts)),
            Some(Value::Text("2023-06-15T10:30:00".to_string()))
        );
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(sanitize(Value::Int(0)), Some(Value::Int(0)));
        assert_eq!(sanitize(Value::Bool(false)), Some(Value::Bool(false)));
        assert_eq!(sanitize(Value::Float(1.5)), Some(Value::Float(1.5)));
        assert_eq!(
            sanitize(Value::Text(String::new())),
            Some(Value::Text(String::new()))
        );
    }

    #[test]
    fn sanitizing_twice_is_identity() {
        let input = object(vec![
            ("a", Value::Null),
            ("b", Value::Array(vec![Value::Int(1), Value::Null])),
            ("c", object(vec![("x", Value::Float(f64::NAN)), ("y", Value::Int(2))])),
        ]);
        let once = sanitize(input).expect("non-empty");
        let twice = sanitize(once.clone()).expect("non-empty");
        assert_eq!(once, twice);
    }

    #[test]
    fn fully_empty_structure_is_absent() {
        let input = object(vec![("a", Value::Null), ("b", Value::Float(f64::NAN))]);
        assert_eq!(sanitize(input), None);
    }
}
