//! The export orchestrator.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{info, warn};

use fairval_core::types::{
    Assumptions, CompanyFinancials, ModelWeights, ValuationPayload, ValuationReport,
};
use fairval_models::derive_report;
use fairval_report::{Language, RendererRegistry, ReportContext, ReportFormat};

use crate::bundle;
use crate::error::{ExportError, ExportResult};
use crate::source::SpreadsheetSource;
use crate::status::{StatusChannel, StatusKind};

/// User-selectable export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Workbook plus the original source spreadsheet, bundled as a zip.
    Complete,
    /// Paginated document.
    Document,
    /// Delimited text report.
    Text,
}

impl ExportFormat {
    /// The renderer format backing this export.
    #[must_use]
    pub fn report_format(&self) -> ReportFormat {
        match self {
            ExportFormat::Complete => ReportFormat::Workbook,
            ExportFormat::Document => ReportFormat::Document,
            ExportFormat::Text => ReportFormat::Text,
        }
    }
}

/// One export request. Everything is borrowed; entities live only for the
/// duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Company snapshot.
    pub financials: &'a CompanyFinancials,
    /// Valuation assumptions.
    pub assumptions: &'a Assumptions,
    /// Model weights.
    pub weights: &'a ModelWeights,
    /// Optional backend-computed detail.
    pub payload: Option<&'a ValuationPayload>,
    /// Requested format.
    pub format: ExportFormat,
    /// Label language.
    pub language: Language,
    /// As-of date stamped into artifact names.
    pub as_of: NaiveDate,
}

/// Terminal outcome classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Everything the request asked for was produced.
    Success,
    /// An artifact was produced, but degraded; the reasons say how.
    Partial {
        /// What was missing or downgraded.
        reasons: Vec<String>,
    },
}

/// The downloadable result.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Suggested file name, `{symbol}_..._{date}.{ext}`.
    pub file_name: String,
    /// Raw artifact bytes.
    pub bytes: Vec<u8>,
}

/// Everything an export run produced.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Success or partial success (failures are errors instead).
    pub status: ExportStatus,
    /// The artifact to save.
    pub artifact: ExportArtifact,
    /// The derived report the artifact was rendered from.
    pub report: ValuationReport,
}

/// Orchestrates derivation, rendering, bundling, and status reporting.
///
/// Holds a re-entrancy guard: a second export started while one is running
/// fails fast with [`ExportError::ExportInProgress`] instead of racing on
/// the downstream file save.
pub struct Exporter {
    registry: RendererRegistry,
    source: Arc<dyn SpreadsheetSource>,
    status: StatusChannel,
    guard: Mutex<()>,
}

impl Exporter {
    /// Creates an exporter over a renderer registry and a spreadsheet source.
    #[must_use]
    pub fn new(registry: RendererRegistry, source: Arc<dyn SpreadsheetSource>) -> Self {
        Self {
            registry,
            source,
            status: StatusChannel::new(),
            guard: Mutex::new(()),
        }
    }

    /// The status channel the orchestrator reports into.
    #[must_use]
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Runs one export end to end.
    ///
    /// Emits a sticky loading notice at the start and exactly one terminal
    /// status (success, partial success, or error) before returning.
    pub fn export(&self, request: &ExportRequest<'_>) -> ExportResult<ExportOutcome> {
        let Some(_guard) = self.guard.try_lock() else {
            self.status.show(
                StatusKind::Error,
                "an export is already in progress".to_string(),
            );
            return Err(ExportError::ExportInProgress);
        };

        let symbol = &request.financials.symbol;
        self.status.show(
            StatusKind::Loading,
            format!("Generating {:?} export for {symbol}...", request.format),
        );
        info!(%symbol, format = ?request.format, "export started");

        match self.run(request) {
            Ok(outcome) => {
                match &outcome.status {
                    ExportStatus::Success => self.status.show(
                        StatusKind::Success,
                        format!("{} is ready", outcome.artifact.file_name),
                    ),
                    ExportStatus::Partial { reasons } => self.status.show(
                        StatusKind::Warning,
                        format!(
                            "{} is ready ({})",
                            outcome.artifact.file_name,
                            reasons.join("; ")
                        ),
                    ),
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(%symbol, error = %err, "export failed");
                self.status.show(StatusKind::Error, err.to_string());
                Err(err)
            }
        }
    }

    fn run(&self, request: &ExportRequest<'_>) -> ExportResult<ExportOutcome> {
        let report = derive_report(
            request.financials,
            request.assumptions,
            request.weights,
            request.payload,
        );
        let ctx = ReportContext {
            financials: request.financials,
            assumptions: request.assumptions,
            weights: request.weights,
            report: &report,
            language: request.language,
            as_of: request.as_of,
        };

        let mut reasons = Vec::new();
        let requested = request.format.report_format();
        let (renderer, degraded) = self.registry.resolve(requested)?;
        if degraded {
            reasons.push(format!(
                "{requested} renderer unavailable, fell back to {}",
                renderer.format()
            ));
        }

        let artifact = match renderer.render(&ctx) {
            Ok(artifact) => artifact,
            Err(err) if renderer.format() != ReportFormat::Text => {
                // Degraded rendering, not total failure: the text renderer
                // still produces a downloadable artifact.
                let Some(text) = self.registry.get(ReportFormat::Text) else {
                    return Err(err.into());
                };
                warn!(renderer = %renderer.format(), error = %err, "renderer failed, degrading to text");
                reasons.push(format!("{} renderer failed: {err}", renderer.format()));
                text.render(&ctx)?
            }
            Err(err) => return Err(err.into()),
        };

        let symbol = &request.financials.symbol;
        let date = request.as_of.format("%Y-%m-%d");
        let (file_name, bytes) = if request.format == ExportFormat::Complete
            && artifact.format == ReportFormat::Workbook
        {
            let mut entries = vec![(
                format!("{symbol}_Valuation_Report_{date}.xlsx"),
                artifact.bytes,
            )];
            match self.fetch_source(symbol) {
                Ok(Some(original)) => {
                    entries.push((format!("{symbol}_Financials.xlsx"), original));
                }
                Ok(None) => {
                    reasons.push("original spreadsheet not available".to_string());
                }
                Err(err) => {
                    // Non-fatal by policy: never block the primary artifact.
                    warn!(%symbol, error = %err, "source spreadsheet retrieval failed");
                    reasons.push(format!("original spreadsheet retrieval failed: {err}"));
                }
            }
            (
                format!("{symbol}_Complete_Report_{date}.zip"),
                bundle::zip_bundle(&entries)?,
            )
        } else {
            (
                format!(
                    "{symbol}_Valuation_Report_{date}.{}",
                    artifact.format.extension()
                ),
                artifact.bytes,
            )
        };

        let status = if reasons.is_empty() {
            ExportStatus::Success
        } else {
            ExportStatus::Partial { reasons }
        };
        Ok(ExportOutcome {
            status,
            artifact: ExportArtifact { file_name, bytes },
            report,
        })
    }

    fn fetch_source(&self, symbol: &str) -> Result<Option<Vec<u8>>, crate::source::SourceError> {
        if !self.source.probe(symbol)? {
            return Ok(None);
        }
        self.source.fetch(symbol).map(Some)
    }
}
