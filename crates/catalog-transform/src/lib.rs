//! Record-joining and field-reshaping pipeline.
//!
//! The pipeline turns flat, relationally-linked tabular records into one
//! nested structure per object: the joiner matches child rows to parent
//! rows by key, the grouper rebuilds `prefix: suffix` column hierarchies,
//! and the sanitizer strips null/NaN values and canonicalizes timestamps.
//! All state is passed explicitly; nothing here touches files.

pub mod assemble;
pub mod error;
pub mod group;
pub mod join;
pub mod sanitize;
pub mod text;

pub use assemble::{assemble_all, assemble_record};
pub use catalog_model::Record;
pub use error::{Result, TransformError};
pub use group::{INTERNAL_PREFIX, group_fields};
pub use join::{interventions_for, object_media_for};
pub use sanitize::sanitize;
pub use text::{normalize_str, normalize_text};
