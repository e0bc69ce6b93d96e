//! Catalog data ingestion: CSV loading and source-table discovery.

pub mod csv_table;
pub mod loader;

pub use csv_table::{parse_cell, read_dataset};
pub use loader::{TABLE_FILES, load_tables};
