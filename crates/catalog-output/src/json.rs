//! JSON rendering and file writing for assembled records.
//!
//! Serialization contract: sorted keys, 4-space indentation, UTF-8 with
//! non-ASCII text left unescaped, and timestamps rendered as ISO-8601
//! strings if any survive to this boundary un-sanitized.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use catalog_model::{Record, Value};

use crate::error::{OutputError, Result};

/// Converts a pipeline value into a `serde_json` value.
///
/// `serde_json`'s map type keeps keys sorted, so the sorted-key contract
/// falls out of the conversion. A non-finite float is the one scalar with
/// no JSON representation and is reported as a typed error.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(OutputError::Unserializable { kind: value.kind() })?,
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Timestamp(ts) => serde_json::Value::String(Value::format_timestamp(*ts)),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_json(item)?);
            }
            serde_json::Value::Array(out)
        }
        Value::Object(entries) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in entries {
                out.insert(key.clone(), to_json(entry)?);
            }
            serde_json::Value::Object(out)
        }
    })
}

/// Writes the assembled records as one pretty-printed JSON array.
pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let mut array = Vec::with_capacity(records.len());
    for record in records {
        array.push(to_json(&Value::Object(record.clone()))?);
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    serde_json::Value::Array(array).serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        path = %path.display(),
        records = records.len(),
        "wrote catalog file"
    );
    Ok(())
}
