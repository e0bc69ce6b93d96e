//! Relational joins from child tables onto a primary object row.
//!
//! All joins are equality scans over in-memory datasets. Source row order is
//! preserved verbatim; the export order of the collection-management system
//! reflects intended display and chronological order, and re-sorting here
//! would destroy it.

use std::collections::BTreeMap;

use catalog_model::{Dataset, JoinSchema, Row, SourceTables, Value};
use tracing::trace;

use crate::error::{Result, TransformError};
use crate::sanitize::sanitize;
use crate::text::normalize_text;

/// Output fields copied from a media row, for both object media and
/// intervention media.
const MEDIA_FIELDS: &[&str] = &[
    "MediaMasterID",
    "RenditionNumber",
    "MediaType",
    "Path",
    "FileName",
];

/// Output fields copied from an intervention detail row; the flag marks
/// free-text columns run through the text normalizer.
const DETAIL_FIELDS: &[(&str, bool)] = &[
    ("CondLineItemID", false),
    ("AttributeType", false),
    ("BriefDescription", true),
    ("Statement", true),
    ("Proposal", true),
    ("ActionTaken", false),
    ("DateCompleted", false),
    ("Treatment", true),
];

/// Scalar fields copied directly from an intervention row.
const INTERVENTION_FIELDS: &[&str] = &["SurveyISODate", "SurveyType", "Project"];

const EXAMINER_ID_COLUMN: &str = "ExaminerID";
const EXAMINER_NAME_COLUMN: &str = "dbo_Constituents_DisplayName";

/// Reads one cell, requiring the column to exist in the dataset. An absent
/// cell on an individual row reads as null; a column missing from the table
/// altogether is fatal.
pub(crate) fn field_value(
    row: &Row,
    dataset: &Dataset,
    dataset_name: &str,
    column: &str,
) -> Result<Value> {
    if !dataset.has_column(column) {
        return Err(TransformError::MissingColumn {
            dataset: dataset_name.to_string(),
            column: column.to_string(),
        });
    }
    Ok(row.get(column).cloned().unwrap_or(Value::Null))
}

/// All rows whose `column` cell equals `key`, in source order. An empty key
/// matches nothing: a record without an object number simply has no
/// interventions, it does not join onto other keyless rows.
pub(crate) fn rows_matching<'a>(
    dataset: &'a Dataset,
    dataset_name: &str,
    column: &str,
    key: &Value,
) -> Result<Vec<&'a Row>> {
    if !dataset.has_column(column) {
        return Err(TransformError::MissingColumn {
            dataset: dataset_name.to_string(),
            column: column.to_string(),
        });
    }
    if key.is_empty() {
        return Ok(Vec::new());
    }
    Ok(dataset
        .rows
        .iter()
        .filter(|row| row.get(column) == Some(key))
        .collect())
}

fn media_entry(row: &Row, dataset: &Dataset, dataset_name: &str) -> Result<Option<Value>> {
    let mut entry = BTreeMap::new();
    for &column in MEDIA_FIELDS {
        entry.insert(
            column.to_string(),
            field_value(row, dataset, dataset_name, column)?,
        );
    }
    Ok(sanitize(Value::Object(entry)))
}

/// Media entries attached directly to the object, keyed by the primary
/// numeric id.
pub fn object_media_for(
    object_row: &Row,
    tables: &SourceTables,
    schema: &JoinSchema,
) -> Result<Vec<Value>> {
    let key = field_value(object_row, &tables.objects, "objects", &schema.object_id)?;
    let rows = rows_matching(
        &tables.object_media,
        "object_media",
        &schema.media_object_id,
        &key,
    )?;
    let mut media = Vec::new();
    for row in rows {
        if let Some(entry) = media_entry(row, &tables.object_media, "object_media")? {
            media.push(entry);
        }
    }
    Ok(media)
}

fn detail_entry(row: &Row, dataset: &Dataset) -> Result<Option<Value>> {
    let mut entry = BTreeMap::new();
    for &(column, is_text) in DETAIL_FIELDS {
        let mut value = field_value(row, dataset, "intervention_details", column)?;
        if is_text {
            value = normalize_text(value);
        }
        entry.insert(column.to_string(), value);
    }
    Ok(sanitize(Value::Object(entry)))
}

/// Intervention entries for one object, keyed by the textual object number,
/// with their detail and related-media collections cascaded in.
pub fn interventions_for(
    object_row: &Row,
    tables: &SourceTables,
    schema: &JoinSchema,
) -> Result<Vec<Value>> {
    let number = field_value(
        object_row,
        &tables.objects,
        "objects",
        &schema.object_number,
    )?;
    let intervention_rows = rows_matching(
        &tables.interventions,
        "interventions",
        &schema.intervention_object_number,
        &number,
    )?;

    let mut interventions = Vec::new();
    for intervention_row in intervention_rows {
        let condition_id = field_value(
            intervention_row,
            &tables.interventions,
            "interventions",
            &schema.condition_id,
        )?;

        let detail_rows = rows_matching(
            &tables.intervention_details,
            "intervention_details",
            &schema.condition_id,
            &condition_id,
        )?;
        let mut details = Vec::new();
        let mut detail_ids = Vec::new();
        for detail_row in &detail_rows {
            let id = field_value(
                detail_row,
                &tables.intervention_details,
                "intervention_details",
                &schema.line_item_id,
            )?;
            if !id.is_empty() {
                detail_ids.push(id);
            }
            if let Some(entry) = detail_entry(detail_row, &tables.intervention_details)? {
                details.push(entry);
            }
        }

        let related_media =
            related_media_for(&detail_ids, &tables.intervention_media, schema)?;

        trace!(
            condition_id = %condition_id,
            details = details.len(),
            related_media = related_media.len(),
            "joined intervention"
        );

        let mut examiner = BTreeMap::new();
        examiner.insert(
            EXAMINER_ID_COLUMN.to_string(),
            field_value(
                intervention_row,
                &tables.interventions,
                "interventions",
                EXAMINER_ID_COLUMN,
            )?,
        );
        examiner.insert(
            "Name".to_string(),
            field_value(
                intervention_row,
                &tables.interventions,
                "interventions",
                EXAMINER_NAME_COLUMN,
            )?,
        );

        let mut entry = BTreeMap::new();
        for &column in INTERVENTION_FIELDS {
            entry.insert(
                column.to_string(),
                field_value(
                    intervention_row,
                    &tables.interventions,
                    "interventions",
                    column,
                )?,
            );
        }
        // The examiner sub-object is always constructed; sanitization drops
        // it again when both fields are empty.
        entry.insert("Examiner".to_string(), Value::Object(examiner));
        entry.insert(schema.condition_id.clone(), condition_id);
        entry.insert("Details".to_string(), Value::Array(details));
        entry.insert("RelatedMedia".to_string(), Value::Array(related_media));

        if let Some(cleaned) = sanitize(Value::Object(entry)) {
            interventions.push(cleaned);
        }
    }
    Ok(interventions)
}

/// Set-membership join: media rows whose foreign key is any of the given
/// detail ids, in source order.
fn related_media_for(
    detail_ids: &[Value],
    media_dataset: &Dataset,
    schema: &JoinSchema,
) -> Result<Vec<Value>> {
    if !media_dataset.has_column(&schema.line_item_id) {
        return Err(TransformError::MissingColumn {
            dataset: "intervention_media".to_string(),
            column: schema.line_item_id.clone(),
        });
    }
    let mut media = Vec::new();
    if detail_ids.is_empty() {
        return Ok(media);
    }
    for row in &media_dataset.rows {
        let fk = row.get(&schema.line_item_id).cloned().unwrap_or(Value::Null);
        if fk.is_empty() || !detail_ids.contains(&fk) {
            continue;
        }
        if let Some(entry) = media_entry(row, media_dataset, "intervention_media")? {
            media.push(entry);
        }
    }
    Ok(media)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: Vec<(&str, Value)>) -> Row {
        cells
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn dataset(columns: &[&str], rows: Vec<Row>) -> Dataset {
        let mut ds = Dataset::new(columns.iter().map(|c| (*c).to_string()).collect());
        for r in rows {
            ds.push_row(r);
        }
        ds
    }

    fn media_columns() -> Vec<&'static str> {
        let mut columns = vec!["CondLineItemID"];
        columns.extend_from_slice(MEDIA_FIELDS);
        columns
    }

    fn tables_with_interventions() -> SourceTables {
        let objects = dataset(
            &["ObjectID", "ObjectNumber"],
            vec![row(vec![
                ("ObjectID", Value::Int(1)),
                ("ObjectNumber", Value::from("Obj-001")),
            ])],
        );
        let interventions = dataset(
            &[
                "ObjectNumber",
                "ConditionID",
                "SurveyISODate",
                "SurveyType",
                "Project",
                "ExaminerID",
                "dbo_Constituents_DisplayName",
            ],
            vec![row(vec![
                ("ObjectNumber", Value::from("Obj-001")),
                ("ConditionID", Value::Int(100)),
                ("SurveyType", Value::from("condition check")),
                ("ExaminerID", Value::Int(42)),
                ("dbo_Constituents_DisplayName", Value::from("A. Restorer")),
            ])],
        );
        let detail_columns = [
            "ConditionID",
            "CondLineItemID",
            "AttributeType",
            "BriefDescription",
            "Statement",
            "Proposal",
            "ActionTaken",
            "DateCompleted",
            "Treatment",
        ];
        let intervention_details = dataset(
            &detail_columns,
            vec![
                row(vec![
                    ("ConditionID", Value::Int(100)),
                    ("CondLineItemID", Value::Int(10)),
                    ("AttributeType", Value::from("first")),
                ]),
                row(vec![
                    ("ConditionID", Value::Int(100)),
                    ("CondLineItemID", Value::Int(11)),
                    ("AttributeType", Value::from("second")),
                ]),
                row(vec![
                    ("ConditionID", Value::Int(100)),
                    ("CondLineItemID", Value::Int(12)),
                    ("AttributeType", Value::from("third")),
                ]),
            ],
        );
        let intervention_media = dataset(
            &media_columns(),
            vec![
                row(vec![
                    ("CondLineItemID", Value::Int(10)),
                    ("FileName", Value::from("before.jpg")),
                ]),
                row(vec![
                    ("CondLineItemID", Value::Int(99)),
                    ("FileName", Value::from("other-object.jpg")),
                ]),
            ],
        );
        SourceTables {
            objects,
            object_media: dataset(&["ObjectID"], Vec::new()),
            interventions,
            intervention_details,
            intervention_media,
            user_fields: dataset(&["ID"], Vec::new()),
        }
    }

    #[test]
    fn details_keep_source_order() {
        let tables = tables_with_interventions();
        let schema = JoinSchema::default();
        let object_row = &tables.objects.rows[0];
        let interventions = interventions_for(object_row, &tables, &schema).expect("join");
        assert_eq!(interventions.len(), 1);

        let entry = interventions[0].as_object().expect("object entry");
        let details = entry["Details"].as_array().expect("details array");
        let order: Vec<&str> = details
            .iter()
            .map(|d| d.as_object().unwrap()["AttributeType"].as_text().unwrap())
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn related_media_uses_membership_not_single_key() {
        let tables = tables_with_interventions();
        let schema = JoinSchema::default();
        let object_row = &tables.objects.rows[0];
        let interventions = interventions_for(object_row, &tables, &schema).expect("join");

        let entry = interventions[0].as_object().expect("object entry");
        let media = entry["RelatedMedia"].as_array().expect("media array");
        assert_eq!(media.len(), 1);
        assert_eq!(
            media[0].as_object().unwrap()["FileName"],
            Value::from("before.jpg")
        );
    }

    #[test]
    fn empty_examiner_vanishes_populated_examiner_stays() {
        let mut tables = tables_with_interventions();
        let schema = JoinSchema::default();

        let object_row = tables.objects.rows[0].clone();
        let interventions = interventions_for(&object_row, &tables, &schema).expect("join");
        let entry = interventions[0].as_object().expect("object entry");
        let examiner = entry["Examiner"].as_object().expect("examiner object");
        assert_eq!(examiner["Name"], Value::from("A. Restorer"));

        // Blank both examiner fields; the sub-object must disappear.
        tables.interventions.rows[0].insert("ExaminerID", Value::Null);
        tables.interventions.rows[0].insert("dbo_Constituents_DisplayName", Value::Null);
        let interventions = interventions_for(&object_row, &tables, &schema).expect("join");
        let entry = interventions[0].as_object().expect("object entry");
        assert!(!entry.contains_key("Examiner"));
    }

    #[test]
    fn missing_join_column_is_fatal() {
        let mut tables = tables_with_interventions();
        tables.interventions.columns.retain(|c| c != "ConditionID");
        let schema = JoinSchema::default();
        let object_row = tables.objects.rows[0].clone();
        let error = interventions_for(&object_row, &tables, &schema).unwrap_err();
        match error {
            TransformError::MissingColumn { dataset, column } => {
                assert_eq!(dataset, "interventions");
                assert_eq!(column, "ConditionID");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_key_matches_nothing() {
        let ds = dataset(
            &["FK"],
            vec![row(vec![("FK", Value::Null)]), row(vec![("FK", Value::Int(1))])],
        );
        let matches = rows_matching(&ds, "test", "FK", &Value::Null).expect("scan");
        assert!(matches.is_empty());
    }

    #[test]
    fn object_media_in_source_order() {
        let mut tables = tables_with_interventions();
        tables.object_media = dataset(
            &media_columns(),
            vec![
                row(vec![
                    ("CondLineItemID", Value::Null),
                    ("FileName", Value::from("a.jpg")),
                ]),
                row(vec![
                    ("CondLineItemID", Value::Null),
                    ("FileName", Value::from("b.jpg")),
                ]),
            ],
        );
        // Rebuild with an ObjectID column on the media table.
        tables.object_media.columns.push("ObjectID".to_string());
        for media_row in &mut tables.object_media.rows {
            media_row.insert("ObjectID", Value::Int(1));
        }
        let schema = JoinSchema::default();
        let object_row = tables.objects.rows[0].clone();
        let media = object_media_for(&object_row, &tables, &schema).expect("join");
        let names: Vec<&str> = media
            .iter()
            .map(|m| m.as_object().unwrap()["FileName"].as_text().unwrap())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }
}
