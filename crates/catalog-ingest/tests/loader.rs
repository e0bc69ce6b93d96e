//! Integration tests for CSV reading and folder loading.

use std::fs;

use catalog_ingest::{load_tables, read_dataset};
use catalog_model::Value;

#[test]
fn read_dataset_types_cells_and_skips_blank_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("objects.csv");
    fs::write(
        &path,
        "ObjectID,ObjectNumber,DateBegin\n1,Obj-001,2024-02-02\n,,\n2,007,\n",
    )
    .expect("write csv");

    let dataset = read_dataset(&path).expect("read dataset");
    assert_eq!(
        dataset.columns,
        vec!["ObjectID", "ObjectNumber", "DateBegin"]
    );
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.rows[0].get("ObjectID"), Some(&Value::Int(1)));
    assert_eq!(dataset.rows[1].get("ObjectNumber"), Some(&Value::from("007")));
    assert_eq!(dataset.rows[1].get("DateBegin"), Some(&Value::Null));
    match dataset.rows[0].get("DateBegin") {
        Some(Value::Timestamp(_)) => {}
        other => panic!("expected timestamp, got {other:?}"),
    }
}

#[test]
fn load_tables_requires_all_six_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    for file in [
        "objects.csv",
        "object_media.csv",
        "interventions.csv",
        "intervention_details.csv",
        "intervention_media.csv",
    ] {
        fs::write(dir.path().join(file), "A\n1\n").expect("write csv");
    }

    let error = load_tables(dir.path()).expect_err("user_fields.csv missing");
    assert!(error.to_string().contains("user_fields"));

    fs::write(dir.path().join("user_fields.csv"), "ID\n1\n").expect("write csv");
    let tables = load_tables(dir.path()).expect("load tables");
    assert_eq!(tables.objects.row_count(), 1);
    assert_eq!(tables.user_fields.row_count(), 1);
}
