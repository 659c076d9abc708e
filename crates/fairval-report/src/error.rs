//! Renderer error types.

use thiserror::Error;

use fairval_core::error::ValuationError;

use crate::registry::ReportFormat;

/// Unified error type for report rendering.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A per-model valuation failure that the requested format cannot absorb.
    #[error("valuation failed: {0}")]
    Valuation(#[from] ValuationError),

    /// No renderer is registered for the format or any of its fallbacks.
    #[error("no renderer available for the {format} format")]
    RenderEngineUnavailable {
        /// The format that could not be served.
        format: ReportFormat,
    },

    /// The workbook engine rejected a write.
    #[error("workbook engine error: {0}")]
    WorkbookEngine(String),

    /// The document engine rejected a write.
    #[error("document engine error: {0}")]
    DocumentEngine(String),

    /// The delimited-text writer failed.
    #[error("text writer error: {0}")]
    TextWriter(String),
}

/// Result type alias for rendering operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(feature = "workbook")]
impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::WorkbookEngine(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::TextWriter(err.to_string())
    }
}
