//! `fairval export` - run the orchestrator and save the artifact.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;

use fairval_export::{
    DirectorySource, ExportRequest, ExportStatus, Exporter, NoSource, SpreadsheetSource,
};
use fairval_report::{Language, RendererRegistry};

use crate::cli::{ExportArgs, OutputFormat};
use crate::output;
use crate::snapshot;

pub fn execute(args: ExportArgs, _format: OutputFormat) -> Result<()> {
    let snapshot = snapshot::load(&args.input)?;
    let language = args
        .lang
        .or(snapshot.language)
        .map_or(Language::En, |code| Language::from_code(&code));

    let source: Arc<dyn SpreadsheetSource> = match &args.source_dir {
        Some(dir) => Arc::new(DirectorySource::new(dir)),
        None => Arc::new(NoSource),
    };
    let exporter = Exporter::new(RendererRegistry::with_available(), source);

    let request = ExportRequest {
        financials: &snapshot.financials,
        assumptions: &snapshot.assumptions,
        weights: &snapshot.weights,
        payload: snapshot.valuation.as_ref(),
        format: args.artifact.export_format(),
        language,
        as_of: Local::now().date_naive(),
    };

    match exporter.export(&request) {
        Ok(outcome) => {
            let path = args.out.join(&outcome.artifact.file_name);
            std::fs::write(&path, &outcome.artifact.bytes)
                .with_context(|| format!("cannot write {}", path.display()))?;
            match outcome.status {
                ExportStatus::Success => {
                    output::print_success(&format!("saved {}", path.display()));
                }
                ExportStatus::Partial { reasons } => {
                    output::print_success(&format!("saved {}", path.display()));
                    for reason in reasons {
                        output::print_warning(&reason);
                    }
                }
            }
            Ok(())
        }
        Err(err) => {
            output::print_error(&err.to_string());
            Err(err.into())
        }
    }
}
