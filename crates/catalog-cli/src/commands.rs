use anyhow::Result;
use comfy_table::Table;

use catalog_cli::pipeline::{ExportOptions, ExportResult, run_export as run_pipeline};
use catalog_ingest::TABLE_FILES;
use catalog_model::JoinSchema;

use crate::cli::ExportArgs;
use crate::summary::apply_table_style;

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let options = ExportOptions {
        data_dir: args.data_dir.clone(),
        output: args.output.clone(),
        schema: args.schema.clone(),
        dry_run: args.dry_run,
    };
    run_pipeline(&options)
}

pub fn run_tables() -> Result<()> {
    let schema = JoinSchema::default();
    let mut table = Table::new();
    table.set_header(vec!["Table", "File", "Join columns"]);
    apply_table_style(&mut table);
    for &(role, file) in TABLE_FILES {
        table.add_row(vec![
            role.to_string(),
            file.to_string(),
            join_columns(role, &schema),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn join_columns(role: &str, schema: &JoinSchema) -> String {
    match role {
        "objects" => format!("{} (primary), {}", schema.object_id, schema.object_number),
        "object_media" => format!("{} -> objects.{}", schema.media_object_id, schema.object_id),
        "interventions" => format!(
            "{} -> objects.{}",
            schema.intervention_object_number, schema.object_number
        ),
        "intervention_details" => format!(
            "{} -> interventions.{}",
            schema.condition_id, schema.condition_id
        ),
        "intervention_media" => format!(
            "{} -> details.{}",
            schema.line_item_id, schema.line_item_id
        ),
        "user_fields" => format!("{} -> objects.{}", schema.user_fields_id, schema.object_id),
        _ => String::new(),
    }
}
