//! CSV reading into typed datasets.
//!
//! Cells are typed on the way in: integers, floats (including the `NaN`
//! marker), timestamps, and text. Typing happens here once so the pipeline
//! downstream never re-parses strings.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;

use catalog_model::{Dataset, Row, Value};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// True for integer spellings that survive a round trip: an optional sign
/// and digits with no leading zero. `007`-style object numbers must stay
/// text.
fn is_canonical_int(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    digits.len() == 1 || !digits.starts_with('0')
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses one raw cell into a typed value. Empty cells are null; the
/// literal `NaN` marker stays a NaN float for the sanitizer to strip.
pub fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("nan") {
        return Value::Float(f64::NAN);
    }
    if is_canonical_int(trimmed)
        && let Ok(n) = trimmed.parse::<i64>()
    {
        return Value::Int(n);
    }
    let numeric_start = trimmed
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.');
    // Digit-only spellings never become floats: that keeps `007`-style
    // identifiers textual instead of silently turning them into 7.0.
    if numeric_start
        && trimmed.contains(['.', 'e', 'E'])
        && let Ok(f) = trimmed.parse::<f64>()
    {
        return Value::Float(f);
    }
    if let Some(ts) = parse_timestamp(trimmed) {
        return Value::Timestamp(ts);
    }
    Value::Text(trimmed.to_string())
}

/// Reads a headered CSV file into a [`Dataset`].
///
/// Every row carries a cell for every header column, null when the source
/// cell is empty or the record is short. Fully empty rows are skipped.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.with_context(|| format!("read header: {}", path.display()))?;
            record.iter().map(normalize_header).collect()
        }
        None => Vec::new(),
    };
    let mut dataset = Dataset::new(headers);

    for record in records {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut row = Row::new();
        for (idx, column) in dataset.columns.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.insert(column.clone(), parse_cell(raw));
        }
        dataset.rows.push(row);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_typed() {
        assert_eq!(parse_cell("42"), Value::Int(42));
        assert_eq!(parse_cell("-7"), Value::Int(-7));
        assert_eq!(parse_cell("1.5"), Value::Float(1.5));
        assert_eq!(parse_cell("hello"), Value::from("hello"));
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell("   "), Value::Null);
    }

    #[test]
    fn nan_marker_stays_nan_float() {
        match parse_cell("NaN") {
            Value::Float(f) => assert!(f.is_nan()),
            other => panic!("expected NaN float, got {other:?}"),
        }
    }

    #[test]
    fn leading_zeros_stay_text() {
        assert_eq!(parse_cell("007"), Value::from("007"));
        assert_eq!(parse_cell("0"), Value::Int(0));
    }

    #[test]
    fn dates_become_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_cell("2024-02-02"), Value::Timestamp(expected));
        let with_time = NaiveDate::from_ymd_opt(2024, 2, 2)
            .unwrap()
            .and_hms_opt(13, 14, 17)
            .unwrap();
        assert_eq!(
            parse_cell("2024-02-02T13:14:17"),
            Value::Timestamp(with_time)
        );
        assert_eq!(
            parse_cell("2024-02-02 13:14:17"),
            Value::Timestamp(with_time)
        );
    }

    #[test]
    fn header_whitespace_collapsed() {
        assert_eq!(normalize_header("  Object   Name "), "Object Name");
        assert_eq!(normalize_header("\u{feff}ObjectID"), "ObjectID");
    }
}
