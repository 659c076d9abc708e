//! # Fairval Export
//!
//! Export orchestration for the valuation engine:
//! - **Exporter**: derives the report once, resolves a renderer (degrading
//!   down the fallback chain when an engine is unavailable), optionally
//!   bundles the original source spreadsheet, and emits exactly one terminal
//!   status event per run
//! - **StatusChannel**: single-slot, type-tagged notifications with per-kind
//!   auto-dismiss delays
//! - **SpreadsheetSource**: the boundary to the data service's original
//!   spreadsheet (probe + fetch); retrieval failure degrades the export to
//!   partial success, never blocks the primary artifact
//!
//! A re-entrancy guard rejects a second export while one is running; the
//! two would otherwise race on the same downstream file save.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod bundle;

pub mod error;
pub mod exporter;
pub mod source;
pub mod status;

pub use error::{ExportError, ExportResult};
pub use exporter::{
    ExportArtifact, ExportFormat, ExportOutcome, ExportRequest, ExportStatus, Exporter,
};
pub use source::{DirectorySource, NoSource, SourceError, SpreadsheetSource};
pub use status::{StatusChannel, StatusEvent, StatusKind};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ExportError, ExportResult};
    pub use crate::exporter::{
        ExportArtifact, ExportFormat, ExportOutcome, ExportRequest, ExportStatus, Exporter,
    };
    pub use crate::source::{DirectorySource, NoSource, SourceError, SpreadsheetSource};
    pub use crate::status::{StatusChannel, StatusEvent, StatusKind};
}
