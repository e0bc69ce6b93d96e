use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_cli::pipeline::ExportResult;
use catalog_output::ValidationOutcome;

pub fn print_summary(result: &ExportResult) {
    if result.dry_run {
        println!("Dry run; no file written.");
    } else {
        println!("Output: {}", result.output_path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for count in &result.table_counts {
        table.add_row(vec![Cell::new(&count.role), Cell::new(count.rows)]);
    }
    table.add_row(vec![
        Cell::new("records written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.records_written).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    match &result.validation {
        Some(ValidationOutcome::Valid) => println!("Validation: OK"),
        Some(ValidationOutcome::Invalid { line, column, .. }) => {
            println!("Validation: FAILED (line {line}, column {column})");
        }
        None => {}
    }

    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
