//! The recursive value union carried through the pipeline.
//!
//! Every cell read from a source table, and every nested structure the
//! assembler builds, is a `Value`. Modeling the union explicitly keeps the
//! recursive transforms (sanitizer, grouper) exhaustive: a new variant is a
//! compile error in every match until it is handled.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// Canonical rendering for date/time values in the final document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A fully assembled nested output record, one per primary object row.
pub type Record = BTreeMap<String, Value>;

/// A scalar, mapping, or list flowing through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value (empty cell, stripped NaN).
    Null,
    Bool(bool),
    Int(i64),
    /// Floating-point cell; may carry NaN from spreadsheet exports until
    /// the sanitizer removes it.
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for values the final document must never contain:
    /// null, NaN, empty list, empty mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            Value::Array(items) => items.is_empty(),
            Value::Object(entries) => entries.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Renders a timestamp to its canonical ISO-8601 string.
    pub fn format_timestamp(ts: NaiveDateTime) -> String {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Short name of the variant, used in error messages at the
    /// serialization boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl std::fmt::Display for Value {
    /// Scalar rendering used in log and error messages; containers fall
    /// back to their debug form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::Timestamp(ts) => f.write_str(&Value::format_timestamp(*ts)),
            other => write!(f, "{other:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}
