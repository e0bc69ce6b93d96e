//! Free-text cleanup for fields exported from Excel.

use catalog_model::Value;

/// The escaped carriage-return marker Excel embeds before a newline when a
/// cell contains a line break.
const CARRIAGE_RETURN_ARTIFACT: &str = "_x000d_\n";

/// Strips export artifacts from a string and trims surrounding whitespace.
pub fn normalize_str(text: &str) -> String {
    text.replace(CARRIAGE_RETURN_ARTIFACT, "\n").trim().to_string()
}

/// Applies [`normalize_str`] to textual values; everything else passes
/// through unchanged. Pure, total.
pub fn normalize_text(value: Value) -> Value {
    match value {
        Value::Text(text) => Value::Text(normalize_str(&text)),
        other => other,
    }
}
