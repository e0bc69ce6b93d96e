//! Tabular datasets as handed over by the loader.

use std::collections::BTreeMap;

use crate::Value;

/// One row of a dataset: a mapping from column name to cell value.
///
/// The loader fills every column, using `Value::Null` for empty cells, so a
/// missing key means the column does not exist in the source table at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of rows sharing one column set.
///
/// Row order is contractual: child collections in the assembled output keep
/// the source order of their dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// The six source tables, passed explicitly into the joiner and assembler.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    /// Primary table; one output record per row.
    pub objects: Dataset,
    pub object_media: Dataset,
    pub interventions: Dataset,
    pub intervention_details: Dataset,
    pub intervention_media: Dataset,
    pub user_fields: Dataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_from_pairs() {
        let row: Row = [
            ("ObjectID".to_string(), Value::Int(1)),
            ("ObjectName".to_string(), Value::from("Crown")),
        ]
        .into_iter()
        .collect();
        assert_eq!(row.get("ObjectID"), Some(&Value::Int(1)));
        assert!(row.get("Missing").is_none());
    }

    #[test]
    fn dataset_tracks_columns() {
        let dataset = Dataset::new(vec!["A".to_string(), "B".to_string()]);
        assert!(dataset.has_column("A"));
        assert!(!dataset.has_column("C"));
        assert_eq!(dataset.row_count(), 0);
    }
}
