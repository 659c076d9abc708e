//! Export error types.

use thiserror::Error;

use fairval_report::ReportError;

/// Unified error type for export orchestration.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another export is still running; concurrent exports would race on the
    /// same downstream file-save.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// The renderer stage failed.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Zip archive assembly failed.
    #[error("archive assembly failed: {0}")]
    Bundle(String),

    /// Filesystem error while persisting the artifact.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Bundle(err.to_string())
    }
}
