//! End-to-end export orchestration tests.

use std::sync::mpsc;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fairval_core::prelude::*;
use fairval_export::prelude::*;
use fairval_report::{
    Artifact, Language, RendererRegistry, ReportContext, ReportFormat, ReportRenderer,
    ReportResult,
};

fn snapshot() -> CompanyFinancials {
    CompanyFinancials {
        symbol: "VNM".into(),
        name: "Vinamilk".into(),
        sector: Some("Consumer Staples".into()),
        exchange: Some("HOSE".into()),
        current_price: dec!(90),
        shares_outstanding: dec!(10),
        eps: Some(dec!(8)),
        book_value_per_share: Some(dec!(50)),
        pe_ratio: None,
        pb_ratio: None,
        revenue_ttm: None,
        net_income_ttm: None,
        ebitda_ttm: None,
        roe: Some(dec!(0.15)),
        roa: None,
        debt_to_equity: None,
        line_items: LineItems {
            net_income: Some(dec!(100)),
            depreciation: Some(dec!(20)),
            net_borrowing: Some(dec!(0)),
            working_capital_change: Some(dec!(10)),
            capex: Some(dec!(30)),
            interest_expense: Some(dec!(10)),
            total_debt: Some(dec!(300)),
            cash: Some(dec!(100)),
        },
    }
}

fn request<'a>(
    financials: &'a CompanyFinancials,
    assumptions: &'a Assumptions,
    weights: &'a ModelWeights,
    format: ExportFormat,
) -> ExportRequest<'a> {
    ExportRequest {
        financials,
        assumptions,
        weights,
        payload: None,
        format,
        language: Language::En,
        as_of: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
    }
}

#[test]
fn complete_export_without_source_is_partial_success() {
    let financials = snapshot();
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();
    let exporter = Exporter::new(RendererRegistry::with_available(), Arc::new(NoSource));

    let outcome = exporter
        .export(&request(
            &financials,
            &assumptions,
            &weights,
            ExportFormat::Complete,
        ))
        .unwrap();

    // The workbook bundle is still produced; the missing original only
    // downgrades the status.
    assert_eq!(
        outcome.artifact.file_name,
        "VNM_Complete_Report_2026-08-07.zip"
    );
    assert_eq!(&outcome.artifact.bytes[..2], b"PK");
    assert!(matches!(outcome.status, ExportStatus::Partial { .. }));
    assert_eq!(
        exporter.status().current().unwrap().kind,
        StatusKind::Warning
    );
}

#[test]
fn complete_export_with_source_is_full_success() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("VNM.xlsx"), b"original spreadsheet").unwrap();

    let financials = snapshot();
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();
    let exporter = Exporter::new(
        RendererRegistry::with_available(),
        Arc::new(DirectorySource::new(dir.path())),
    );

    let outcome = exporter
        .export(&request(
            &financials,
            &assumptions,
            &weights,
            ExportFormat::Complete,
        ))
        .unwrap();

    assert_eq!(outcome.status, ExportStatus::Success);
    assert_eq!(
        exporter.status().current().unwrap().kind,
        StatusKind::Success
    );

    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(outcome.artifact.bytes)).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.by_name("VNM_Financials.xlsx").is_ok());
}

#[test]
fn text_export_names_and_renders() {
    let financials = snapshot();
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();
    let exporter = Exporter::new(RendererRegistry::with_available(), Arc::new(NoSource));

    let outcome = exporter
        .export(&request(
            &financials,
            &assumptions,
            &weights,
            ExportFormat::Text,
        ))
        .unwrap();

    assert_eq!(
        outcome.artifact.file_name,
        "VNM_Valuation_Report_2026-08-07.txt"
    );
    assert_eq!(outcome.status, ExportStatus::Success);
    let text = String::from_utf8(outcome.artifact.bytes).unwrap();
    assert!(text.contains("Valuation Report\tVNM"));
}

#[test]
fn missing_renderer_degrades_to_text_with_partial_status() {
    // A registry without the document renderer: the document request
    // degrades to text rather than failing.
    let mut registry = RendererRegistry::new();
    registry.register(Box::new(fairval_report::text::TextRenderer::new()));
    let exporter = Exporter::new(registry, Arc::new(NoSource));

    let financials = snapshot();
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();
    let outcome = exporter
        .export(&request(
            &financials,
            &assumptions,
            &weights,
            ExportFormat::Document,
        ))
        .unwrap();

    assert_eq!(
        outcome.artifact.file_name,
        "VNM_Valuation_Report_2026-08-07.txt"
    );
    match &outcome.status {
        ExportStatus::Partial { reasons } => {
            assert!(reasons.iter().any(|r| r.contains("unavailable")));
        }
        other => panic!("expected partial success, got {other:?}"),
    }
}

#[test]
fn text_export_fails_when_a_model_fails() {
    let mut financials = snapshot();
    financials.shares_outstanding = Decimal::ZERO;
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();
    let exporter = Exporter::new(RendererRegistry::with_available(), Arc::new(NoSource));

    let err = exporter.export(&request(
        &financials,
        &assumptions,
        &weights,
        ExportFormat::Text,
    ));
    assert!(matches!(err, Err(ExportError::Report(_))));
    assert_eq!(exporter.status().current().unwrap().kind, StatusKind::Error);
}

/// Renderer that parks until released, to hold the export guard open.
struct BlockingRenderer {
    started: std::sync::Mutex<mpsc::Sender<()>>,
    release: std::sync::Mutex<mpsc::Receiver<()>>,
}

impl ReportRenderer for BlockingRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn render(&self, _ctx: &ReportContext<'_>) -> ReportResult<Artifact> {
        self.started.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        Ok(Artifact {
            format: ReportFormat::Text,
            bytes: b"blocked".to_vec(),
        })
    }
}

#[test]
fn concurrent_export_is_rejected_while_one_runs() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let mut registry = RendererRegistry::new();
    registry.register(Box::new(BlockingRenderer {
        started: std::sync::Mutex::new(started_tx),
        release: std::sync::Mutex::new(release_rx),
    }));
    let exporter = Exporter::new(registry, Arc::new(NoSource));

    let financials = snapshot();
    let assumptions = Assumptions::default();
    let weights = ModelWeights::default();

    std::thread::scope(|scope| {
        let first = scope.spawn(|| {
            exporter.export(&request(
                &financials,
                &assumptions,
                &weights,
                ExportFormat::Text,
            ))
        });

        // Wait until the first export holds the guard inside render().
        started_rx.recv().unwrap();
        let second = exporter.export(&request(
            &financials,
            &assumptions,
            &weights,
            ExportFormat::Text,
        ));
        assert!(matches!(second, Err(ExportError::ExportInProgress)));

        release_tx.send(()).unwrap();
        assert!(first.join().unwrap().is_ok());
    });
}
