//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Equity valuation and report generation from a company snapshot.
#[derive(Debug, Parser)]
#[command(name = "fairval", version, about)]
pub struct Cli {
    /// Terminal output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive fair values and print the valuation summary.
    Value(ValueArgs),
    /// Render an export artifact and save it to disk.
    Export(ExportArgs),
}

/// Arguments for `fairval value`.
#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Path to the company snapshot JSON.
    #[arg(long, short)]
    pub input: PathBuf,
}

/// Arguments for `fairval export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Path to the company snapshot JSON.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Which artifact to produce.
    #[arg(long, value_enum, default_value_t = ArtifactKind::Complete)]
    pub artifact: ArtifactKind,

    /// Directory the artifact is written into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Directory holding original source spreadsheets ({SYMBOL}.xlsx).
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Two-letter label language, overriding the snapshot's.
    #[arg(long)]
    pub lang: Option<String>,
}

/// Terminal output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rounded table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Export artifact selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactKind {
    /// Workbook plus the original spreadsheet, zipped.
    Complete,
    /// Paginated PDF document.
    Document,
    /// Tab-delimited text report.
    Text,
}

impl ArtifactKind {
    /// Maps the CLI selection to the orchestrator's format.
    pub fn export_format(self) -> fairval_export::ExportFormat {
        match self {
            ArtifactKind::Complete => fairval_export::ExportFormat::Complete,
            ArtifactKind::Document => fairval_export::ExportFormat::Document,
            ArtifactKind::Text => fairval_export::ExportFormat::Text,
        }
    }
}
