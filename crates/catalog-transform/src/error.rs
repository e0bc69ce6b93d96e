use thiserror::Error;

/// Errors raised while joining and assembling records.
///
/// Null or empty cell values are never errors; they are absorbed by the
/// sanitizer's absence semantics. Only structural problems abort the run.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An expected join or field column does not exist in a source table.
    #[error("missing column `{column}` in dataset `{dataset}`")]
    MissingColumn { dataset: String, column: String },

    /// More than one user-field row matched a single object key.
    #[error("duplicate user-field rows for key {key}")]
    DuplicateUserFields { key: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
