//! Catalog output generation: JSON rendering, writing, and post-write
//! validation.

pub mod error;
pub mod json;
pub mod validate;

pub use error::{OutputError, Result};
pub use json::{to_json, write_records};
pub use validate::{ValidationOutcome, validate_json_file};
