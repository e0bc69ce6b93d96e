//! Post-write validation: re-parse the written file and report the result.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Outcome of re-parsing a written catalog file.
///
/// A failed parse is reported, never retried; the run that produced the
/// file has already completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid {
        message: String,
        line: usize,
        column: usize,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Re-parses `path` as JSON and reports pass/fail with the decode error's
/// message and position on failure.
pub fn validate_json_file(path: &Path) -> Result<ValidationOutcome> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match serde_json::from_reader::<_, serde_json::Value>(reader) {
        Ok(_) => Ok(ValidationOutcome::Valid),
        Err(error) => {
            warn!(
                path = %path.display(),
                line = error.line(),
                column = error.column(),
                "written file is not valid JSON"
            );
            Ok(ValidationOutcome::Invalid {
                message: error.to_string(),
                line: error.line(),
                column: error.column(),
            })
        }
    }
}
