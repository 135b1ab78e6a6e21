//! Error types

/// Errors surfaced at the boundary with the host: reading data, reading
/// settings and persisting the selection.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A data file or property value was not valid JSON, or did not have the
    /// expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
