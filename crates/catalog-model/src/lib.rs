//! Catalog data model definitions.
//!
//! The model is deliberately small: a tagged recursive [`Value`] union, the
//! [`Dataset`]/[`Row`] tabular shape the loader produces, the
//! [`SourceTables`] bundle the pipeline consumes, and the [`JoinSchema`]
//! configuration naming the join-key columns.

pub mod dataset;
pub mod schema;
pub mod value;

pub use dataset::{Dataset, Row, SourceTables};
pub use schema::JoinSchema;
pub use value::{Record, TIMESTAMP_FORMAT, Value};
