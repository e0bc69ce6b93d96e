//! Source-folder discovery for the six expected tables.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use catalog_model::{Dataset, SourceTables};

use crate::csv_table::read_dataset;

pub const OBJECTS_FILE: &str = "objects.csv";
pub const OBJECT_MEDIA_FILE: &str = "object_media.csv";
pub const INTERVENTIONS_FILE: &str = "interventions.csv";
pub const INTERVENTION_DETAILS_FILE: &str = "intervention_details.csv";
pub const INTERVENTION_MEDIA_FILE: &str = "intervention_media.csv";
pub const USER_FIELDS_FILE: &str = "user_fields.csv";

/// The expected files in loading order, with a human-readable role name.
pub const TABLE_FILES: &[(&str, &str)] = &[
    ("objects", OBJECTS_FILE),
    ("object_media", OBJECT_MEDIA_FILE),
    ("interventions", INTERVENTIONS_FILE),
    ("intervention_details", INTERVENTION_DETAILS_FILE),
    ("intervention_media", INTERVENTION_MEDIA_FILE),
    ("user_fields", USER_FIELDS_FILE),
];

fn load_table(dir: &Path, role: &str, file: &str) -> Result<Dataset> {
    let path = dir.join(file);
    let dataset = read_dataset(&path).with_context(|| format!("load {role} table"))?;
    info!(
        table = role,
        rows = dataset.row_count(),
        columns = dataset.columns.len(),
        "loaded table"
    );
    Ok(dataset)
}

/// Loads all six source tables from a data folder.
pub fn load_tables(dir: &Path) -> Result<SourceTables> {
    Ok(SourceTables {
        objects: load_table(dir, "objects", OBJECTS_FILE)?,
        object_media: load_table(dir, "object_media", OBJECT_MEDIA_FILE)?,
        interventions: load_table(dir, "interventions", INTERVENTIONS_FILE)?,
        intervention_details: load_table(dir, "intervention_details", INTERVENTION_DETAILS_FILE)?,
        intervention_media: load_table(dir, "intervention_media", INTERVENTION_MEDIA_FILE)?,
        user_fields: load_table(dir, "user_fields", USER_FIELDS_FILE)?,
    })
}
