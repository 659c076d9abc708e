//! # Fairval Report
//!
//! Artifact renderers for the valuation engine:
//! - **Workbook** (feature `workbook`): multi-sheet xlsx where every derived
//!   cell carries an adjacent formula annotation, so the sheet audits itself
//! - **Document** (feature `document`): paginated A4 PDF with a vertical
//!   cursor, automatic page breaks, and a running header/footer
//! - **Text**: flat tab-delimited report, deterministic for identical
//!   inputs, always compiled in
//!
//! Renderers are registered in a [`RendererRegistry`](registry::RendererRegistry)
//! keyed by format; a format whose engine is not compiled in degrades down
//! the fallback chain to text. All renderers are read-only consumers of the
//! derived [`ValuationReport`](fairval_core::types::ValuationReport): none
//! of them recomputes a valuation number, which is what keeps the artifacts
//! numerically consistent with each other.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod audit;

pub mod context;
pub mod error;
pub mod format;
pub mod labels;
pub mod registry;
pub mod text;

#[cfg(feature = "document")]
pub mod document;
#[cfg(feature = "workbook")]
pub mod workbook;

pub use context::{Language, ReportContext};
pub use error::{ReportError, ReportResult};
pub use registry::{Artifact, RendererRegistry, ReportFormat, ReportRenderer};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::context::{Language, ReportContext};
    pub use crate::error::{ReportError, ReportResult};
    pub use crate::registry::{Artifact, RendererRegistry, ReportFormat, ReportRenderer};
    pub use crate::text::TextRenderer;

    #[cfg(feature = "document")]
    pub use crate::document::DocumentRenderer;
    #[cfg(feature = "workbook")]
    pub use crate::workbook::WorkbookRenderer;
}
