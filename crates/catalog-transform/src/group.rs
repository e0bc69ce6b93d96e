//! Reshaping of flat `Prefix: Suffix` column names into nested mappings.
//!
//! The user-field table encodes a hierarchy in its column names: several
//! columns named `"Corrosion: Type"`, `"Corrosion: Extent"` belong together
//! as one `Corrosion` sub-object. The grouper rebuilds that nesting and
//! drops columns flagged as internal by the reserved name prefix.

use std::collections::BTreeMap;

use catalog_model::Value;

/// Column-name prefix marking a field as internal; such fields never reach
/// the output.
pub const INTERNAL_PREFIX: &str = "XXX_";

/// Separator between prefix and suffix in a grouped column name. Only the
/// first occurrence splits per level; deeper levels are handled by the
/// recursive pass.
const SEPARATOR: char = ':';

/// Key under which a bare value is preserved when its prefix is promoted to
/// a nested mapping.
const COLLISION_KEY: &str = "value";

/// Groups a flat mapping into nested mappings by the `prefix: suffix`
/// column-name convention.
///
/// A bare key whose name later appears as a prefix is promoted to a mapping
/// with the prior value kept under `"value"`; the reverse arrival order
/// folds the bare value in the same way instead of clobbering the mapping.
/// Keys without a separator pass through as flat leaves. `BTreeMap`
/// iteration makes the pass deterministic: a bare key always sorts before
/// its grouped siblings.
pub fn group_fields(flat: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    let mut grouped: BTreeMap<String, Value> = BTreeMap::new();

    for (key, value) in flat {
        if key.starts_with(INTERNAL_PREFIX) {
            continue;
        }
        match key.split_once(SEPARATOR) {
            Some((prefix, suffix)) => {
                let prefix = prefix.trim().to_string();
                let suffix = suffix.trim().to_string();
                match grouped.get_mut(&prefix) {
                    Some(Value::Object(nested)) => {
                        nested.insert(suffix, value);
                    }
                    Some(existing) => {
                        // Prefix already holds a bare value; keep it under
                        // the sentinel key inside the new mapping.
                        let prior = std::mem::replace(existing, Value::Null);
                        let mut nested = BTreeMap::new();
                        nested.insert(COLLISION_KEY.to_string(), prior);
                        nested.insert(suffix, value);
                        *existing = Value::Object(nested);
                    }
                    None => {
                        let mut nested = BTreeMap::new();
                        nested.insert(suffix, value);
                        grouped.insert(prefix, Value::Object(nested));
                    }
                }
            }
            None => match grouped.get_mut(&key) {
                Some(Value::Object(nested)) => {
                    nested.insert(COLLISION_KEY.to_string(), value);
                }
                _ => {
                    grouped.insert(key, value);
                }
            },
        }
    }

    // Second pass: multi-level prefixes like "A:B:C" leave "B:C" keys inside
    // the nested mapping; group each nested level the same way.
    grouped
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(nested) => (key, Value::Object(group_fields(nested))),
            other => (key, other),
        })
        .collect()
}
