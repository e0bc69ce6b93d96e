//! Per-object record assembly.
//!
//! One nested output record is built per primary row: scalar object fields,
//! the joined `Media` and `Interventions` collections, and the grouped
//! `ConditionAttributes` from the user-field table, with a final
//! sanitization pass over the whole structure.

use std::collections::BTreeMap;

use catalog_model::{JoinSchema, Record, Row, SourceTables, Value};
use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::group::group_fields;
use crate::join::{field_value, interventions_for, object_media_for, rows_matching};
use crate::sanitize::sanitize;
use crate::text::normalize_text;

/// Scalar fields copied from the primary row, as `(output key, source
/// column)` pairs. `AuthorityID` is renamed on the way out.
const OBJECT_FIELDS: &[(&str, &str)] = &[
    ("ObjectID", "ObjectID"),
    ("ObjectNumber", "ObjectNumber"),
    ("ObjectName", "ObjectName"),
    ("Dated", "Dated"),
    ("DateBegin", "DateBegin"),
    ("DateEnd", "DateEnd"),
    ("Medium", "Medium"),
    ("Dimensions", "Dimensions"),
    ("Description", "Description"),
    ("Authority50ID", "AuthorityID"),
    ("Bestandteil", "Bestandteil"),
];

/// Primary columns holding free text that needs export-artifact cleanup.
const OBJECT_TEXT_FIELDS: &[&str] = &["Description"];

/// Assembles the nested record for one primary row.
///
/// Returns `Ok(None)` when every field sanitized away to nothing; such a
/// record is dropped from the output entirely.
pub fn assemble_record(
    object_row: &Row,
    tables: &SourceTables,
    schema: &JoinSchema,
) -> Result<Option<Record>> {
    let mut fields = BTreeMap::new();
    for &(output_key, source_column) in OBJECT_FIELDS {
        let mut value = field_value(object_row, &tables.objects, "objects", source_column)?;
        if OBJECT_TEXT_FIELDS.contains(&source_column) {
            value = normalize_text(value);
        }
        fields.insert(output_key.to_string(), value);
    }
    let mut record = match sanitize(Value::Object(fields)) {
        Some(Value::Object(entries)) => entries,
        _ => BTreeMap::new(),
    };

    let media = object_media_for(object_row, tables, schema)?;
    if !media.is_empty() {
        record.insert("Media".to_string(), Value::Array(media));
    }

    let interventions = interventions_for(object_row, tables, schema)?;
    if !interventions.is_empty() {
        record.insert("Interventions".to_string(), Value::Array(interventions));
    }

    if let Some(attributes) = condition_attributes(object_row, tables, schema)? {
        record.insert("ConditionAttributes".to_string(), attributes);
    }

    match sanitize(Value::Object(record)) {
        Some(Value::Object(entries)) => Ok(Some(entries)),
        _ => Ok(None),
    }
}

/// The grouped user-field attributes for one object, if any.
///
/// Exactly one user-field row may match an object key; duplicates are a
/// correctness problem in the source export and abort the run rather than
/// silently taking the first match.
fn condition_attributes(
    object_row: &Row,
    tables: &SourceTables,
    schema: &JoinSchema,
) -> Result<Option<Value>> {
    let key = field_value(object_row, &tables.objects, "objects", &schema.object_id)?;
    let matches = rows_matching(
        &tables.user_fields,
        "user_fields",
        &schema.user_fields_id,
        &key,
    )?;
    if matches.len() > 1 {
        return Err(TransformError::DuplicateUserFields {
            key: key.to_string(),
        });
    }
    let Some(user_row) = matches.first() else {
        return Ok(None);
    };

    let mut flat = user_row.cells.clone();
    flat.remove(&schema.user_fields_id);
    let Some(Value::Object(cleaned)) = sanitize(Value::Object(flat)) else {
        return Ok(None);
    };
    let grouped = group_fields(cleaned);
    if grouped.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Value::Object(grouped)))
    }
}

/// Assembles records for every primary row, in source order, dropping rows
/// that sanitize away entirely.
pub fn assemble_all(tables: &SourceTables, schema: &JoinSchema) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(tables.objects.rows.len());
    let mut dropped = 0usize;
    for (index, object_row) in tables.objects.rows.iter().enumerate() {
        match assemble_record(object_row, tables, schema)? {
            Some(record) => {
                debug!(row = index, keys = record.len(), "assembled record");
                records.push(record);
            }
            None => {
                debug!(row = index, "record sanitized away, dropping");
                dropped += 1;
            }
        }
    }
    info!(
        records = records.len(),
        dropped,
        "record assembly complete"
    );
    Ok(records)
}
