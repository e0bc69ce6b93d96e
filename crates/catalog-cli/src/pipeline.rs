//! Export pipeline orchestration: load, assemble, write, validate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use catalog_ingest::load_tables;
use catalog_model::{JoinSchema, SourceTables};
use catalog_output::{ValidationOutcome, validate_json_file, write_records};
use catalog_transform::assemble_all;

/// Default name of the written catalog file inside the data folder.
pub const DEFAULT_OUTPUT_FILE: &str = "catalog.json";

/// Inputs for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Folder containing the six source CSV tables.
    pub data_dir: PathBuf,
    /// Output file path (default: `<data_dir>/catalog.json`).
    pub output: Option<PathBuf>,
    /// Optional JSON file overriding the default join-key columns.
    pub schema: Option<PathBuf>,
    /// Assemble and validate without writing the output file.
    pub dry_run: bool,
}

/// Per-table row count for the run summary.
#[derive(Debug, Clone)]
pub struct TableCount {
    pub role: String,
    pub rows: usize,
}

/// Result of one export run.
#[derive(Debug)]
pub struct ExportResult {
    pub output_path: PathBuf,
    pub records_written: usize,
    pub table_counts: Vec<TableCount>,
    /// Post-write validation outcome; absent on a dry run.
    pub validation: Option<ValidationOutcome>,
    pub dry_run: bool,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Loads the join schema from a JSON file, or the defaults when no file is
/// given.
pub fn load_schema(path: Option<&Path>) -> Result<JoinSchema> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read schema: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parse schema: {}", path.display()))
        }
        None => Ok(JoinSchema::default()),
    }
}

fn table_counts(tables: &SourceTables) -> Vec<TableCount> {
    [
        ("objects", &tables.objects),
        ("object_media", &tables.object_media),
        ("interventions", &tables.interventions),
        ("intervention_details", &tables.intervention_details),
        ("intervention_media", &tables.intervention_media),
        ("user_fields", &tables.user_fields),
    ]
    .into_iter()
    .map(|(role, dataset)| TableCount {
        role: role.to_string(),
        rows: dataset.row_count(),
    })
    .collect()
}

/// Runs the whole export: load tables, assemble records, write the JSON
/// file, re-parse it.
pub fn run_export(options: &ExportOptions) -> Result<ExportResult> {
    let span = info_span!("export", data_dir = %options.data_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let schema = load_schema(options.schema.as_deref())?;
    let tables = load_tables(&options.data_dir).context("load source tables")?;
    let counts = table_counts(&tables);

    let records = assemble_all(&tables, &schema).context("assemble records")?;

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| options.data_dir.join(DEFAULT_OUTPUT_FILE));

    let mut errors = Vec::new();
    let validation = if options.dry_run {
        info!(records = records.len(), "dry run, skipping write");
        None
    } else {
        write_records(&output_path, &records).context("write catalog file")?;
        let outcome = validate_json_file(&output_path).context("re-parse catalog file")?;
        if let ValidationOutcome::Invalid {
            message,
            line,
            column,
        } = &outcome
        {
            errors.push(format!(
                "written file is not valid JSON at line {line}, column {column}: {message}"
            ));
        }
        Some(outcome)
    };

    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );

    let has_errors = !errors.is_empty();
    Ok(ExportResult {
        output_path,
        records_written: records.len(),
        table_counts: counts,
        validation,
        dry_run: options.dry_run,
        errors,
        has_errors,
    })
}
