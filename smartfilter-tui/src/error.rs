//! Application error type.

use smartfilter_lib::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("usage: smartfilter-tui <data.json>")]
    Usage,

    #[error("could not determine the data directory")]
    NoDataDir,

    #[error("{0}")]
    Filter(#[from] FilterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
