use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A scalar with no JSON representation reached the write boundary.
    /// Timestamps are handled by the renderer, so in practice this is a
    /// non-finite float that skipped sanitization.
    #[error("value of type `{kind}` is not JSON serializable")]
    Unserializable { kind: &'static str },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
