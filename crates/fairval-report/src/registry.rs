//! Renderer registry and capability-checked fallback.
//!
//! Availability of the heavyweight engines is a build-time capability
//! (cargo features), so renderer selection is a registry lookup instead of
//! ad hoc existence checks. When the requested format has no registered
//! renderer the registry walks the fallback chain (every rich format
//! degrades to the always-available text renderer) and reports whether the
//! caller got a downgraded artifact.

use crate::context::ReportContext;
use crate::error::{ReportError, ReportResult};
use std::fmt;

/// The three artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// Multi-sheet workbook with self-auditing formula annotations.
    Workbook,
    /// Paginated document.
    Document,
    /// Flat delimited text.
    Text,
}

impl ReportFormat {
    /// File extension for the artifact.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Workbook => "xlsx",
            ReportFormat::Document => "pdf",
            ReportFormat::Text => "txt",
        }
    }

    /// Next format to try when no renderer serves this one.
    #[must_use]
    pub fn fallback(&self) -> Option<ReportFormat> {
        match self {
            ReportFormat::Workbook | ReportFormat::Document => Some(ReportFormat::Text),
            ReportFormat::Text => None,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Workbook => "workbook",
            ReportFormat::Document => "document",
            ReportFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// A rendered artifact: raw bytes plus the format they are in.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Format actually produced (may differ from the request after fallback).
    pub format: ReportFormat,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// A renderer for one artifact format.
///
/// Implementations are pure consumers of the derived report: they lay out
/// and format, but never recompute valuation numbers.
pub trait ReportRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ReportFormat;

    /// Renders the artifact.
    fn render(&self, ctx: &ReportContext<'_>) -> ReportResult<Artifact>;
}

/// Registry of the renderers compiled into this build.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn ReportRenderer>>,
}

impl RendererRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every renderer this build carries.
    ///
    /// The text renderer is always present; the workbook and document
    /// renderers are registered only when their features are compiled in.
    #[must_use]
    pub fn with_available() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "workbook")]
        registry.register(Box::new(crate::workbook::WorkbookRenderer::new()));
        #[cfg(feature = "document")]
        registry.register(Box::new(crate::document::DocumentRenderer::new()));
        registry.register(Box::new(crate::text::TextRenderer::new()));
        registry
    }

    /// Adds a renderer.
    pub fn register(&mut self, renderer: Box<dyn ReportRenderer>) {
        self.renderers.push(renderer);
    }

    /// Looks up the renderer for an exact format.
    #[must_use]
    pub fn get(&self, format: ReportFormat) -> Option<&dyn ReportRenderer> {
        self.renderers
            .iter()
            .find(|r| r.format() == format)
            .map(|r| r.as_ref())
    }

    /// Resolves a renderer for `format`, walking the fallback chain.
    ///
    /// Returns the renderer and `true` when it serves a degraded format
    /// rather than the requested one.
    pub fn resolve(&self, format: ReportFormat) -> ReportResult<(&dyn ReportRenderer, bool)> {
        if let Some(renderer) = self.get(format) {
            return Ok((renderer, false));
        }
        let mut next = format.fallback();
        while let Some(candidate) = next {
            if let Some(renderer) = self.get(candidate) {
                tracing::warn!(requested = %format, degraded = %candidate, "renderer unavailable, degrading");
                return Ok((renderer, true));
            }
            next = candidate.fallback();
        }
        Err(ReportError::RenderEngineUnavailable { format })
    }
}
