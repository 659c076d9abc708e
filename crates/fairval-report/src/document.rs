//! Paginated document renderer.
//!
//! Fixed A4 pages written through a vertical cursor. `check_page_break` is
//! called before any block taller than one row; on overflow a fresh page is
//! started, the running header and page-number footer are stamped, and the
//! cursor resets below the header. A per-model valuation failure renders as
//! a single `N/A` row; the document itself always completes.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use rust_decimal::Decimal;

use fairval_core::types::{CashFlowDetail, ModelDetail, ModelResult, MultipleDetail, ValuationModel};

use crate::audit;
use crate::context::ReportContext;
use crate::error::{ReportError, ReportResult};
use crate::format;
use crate::labels;
use crate::registry::{Artifact, ReportFormat, ReportRenderer};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 18.0;
const MARGIN_LEFT: f64 = 18.0;
const LINE_HEIGHT: f64 = 6.0;
const VALUE_COLUMN: f64 = 95.0;
const NOTE_COLUMN: f64 = 132.0;

/// The paginated document renderer (feature `document`).
#[derive(Debug, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Creates the renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for DocumentRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Document
    }

    fn render(&self, ctx: &ReportContext<'_>) -> ReportResult<Artifact> {
        let title = format!("{} - {}", ctx.report.symbol, t(ctx, "report_title"));
        let mut page = PageWriter::new(&title)?;

        write_cover(&mut page, ctx);
        write_company_section(&mut page, ctx);
        write_summary_section(&mut page, ctx);
        for outcome in &ctx.report.models {
            page.heading(outcome.model.label());
            match &outcome.result {
                Ok(result) => write_model_section(&mut page, ctx, result),
                Err(err) => {
                    // Per-model failure: one N/A row, the rest continues.
                    page.row3(
                        t(ctx, "value_per_share"),
                        t(ctx, "not_available"),
                        &err.to_string(),
                    );
                }
            }
        }
        write_assumptions_section(&mut page, ctx);
        write_health_section(&mut page, ctx);

        let bytes = page.finish()?;
        Ok(Artifact {
            format: ReportFormat::Document,
            bytes,
        })
    }
}

fn t(ctx: &ReportContext<'_>, key: &'static str) -> &'static str {
    labels::text(key, ctx.language)
}

/// Vertical-cursor writer over the PDF pages.
struct PageWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    layer: PdfLayerReference,
    y: f64,
    page_no: u32,
    running_header: String,
}

impl PageWriter {
    fn new(title: &str) -> ReportResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::DocumentEngine(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::DocumentEngine(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            font,
            bold,
            layer,
            y: PAGE_HEIGHT - MARGIN_TOP,
            page_no: 1,
            running_header: title.to_string(),
        })
    }

    /// Starts a new page when fewer than `needed` millimetres remain.
    ///
    /// Must be called before writing any block taller than one row.
    fn check_page_break(&mut self, needed: f64) {
        if self.y - needed < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_no += 1;

        // Running header and page-number footer on every page after the first.
        self.layer.use_text(
            self.running_header.clone(),
            9.0,
            Mm(MARGIN_LEFT as f32),
            Mm((PAGE_HEIGHT - 12.0) as f32),
            &self.font,
        );
        self.layer.use_text(
            format!("- {} -", self.page_no),
            9.0,
            Mm((PAGE_WIDTH / 2.0 - 6.0) as f32),
            Mm(10.0),
            &self.font,
        );
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn text_at(&mut self, text: &str, size: f64, x: f64, bold: bool) {
        let font = if bold { &self.bold } else { &self.font };
        self.layer
            .use_text(text.to_string(), size as f32, Mm(x as f32), Mm(self.y as f32), font);
    }

    fn title(&mut self, text: &str) {
        self.check_page_break(LINE_HEIGHT * 2.0);
        self.text_at(text, 16.0, MARGIN_LEFT, true);
        self.y -= LINE_HEIGHT * 2.0;
    }

    fn heading(&mut self, text: &str) {
        // Keep the heading and at least two rows together.
        self.check_page_break(LINE_HEIGHT * 4.0);
        self.y -= LINE_HEIGHT / 2.0;
        self.text_at(text, 12.0, MARGIN_LEFT, true);
        self.y -= LINE_HEIGHT * 1.5;
    }

    fn line(&mut self, text: &str) {
        self.check_page_break(LINE_HEIGHT);
        self.text_at(text, 10.0, MARGIN_LEFT, false);
        self.y -= LINE_HEIGHT;
    }

    fn row(&mut self, label: &str, value: &str) {
        self.check_page_break(LINE_HEIGHT);
        self.text_at(label, 10.0, MARGIN_LEFT, false);
        self.text_at(value, 10.0, VALUE_COLUMN, false);
        self.y -= LINE_HEIGHT;
    }

    fn row3(&mut self, label: &str, value: &str, note: &str) {
        self.check_page_break(LINE_HEIGHT);
        self.text_at(label, 10.0, MARGIN_LEFT, false);
        self.text_at(value, 10.0, VALUE_COLUMN, false);
        self.text_at(note, 8.0, NOTE_COLUMN, false);
        self.y -= LINE_HEIGHT;
    }

    fn header_row(&mut self, label: &str, value: &str, note: &str) {
        self.check_page_break(LINE_HEIGHT);
        self.text_at(label, 10.0, MARGIN_LEFT, true);
        self.text_at(value, 10.0, VALUE_COLUMN, true);
        self.text_at(note, 10.0, NOTE_COLUMN, true);
        self.y -= LINE_HEIGHT;
    }

    fn finish(self) -> ReportResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ReportError::DocumentEngine(e.to_string()))
    }
}

fn write_cover(page: &mut PageWriter, ctx: &ReportContext<'_>) {
    let f = ctx.financials;
    page.title(&format!("{} - {}", t(ctx, "report_title"), f.symbol));
    page.line(&f.name);
    page.row(
        t(ctx, "generated"),
        &ctx.as_of.format("%Y-%m-%d").to_string(),
    );
    page.y -= LINE_HEIGHT;
}

fn write_company_section(page: &mut PageWriter, ctx: &ReportContext<'_>) {
    let f = ctx.financials;
    page.heading(t(ctx, "company_info"));
    if let Some(sector) = &f.sector {
        page.row(t(ctx, "sector"), sector);
    }
    if let Some(exchange) = &f.exchange {
        page.row(t(ctx, "exchange"), exchange);
    }
    page.row(t(ctx, "current_price"), &format::money(f.current_price));
    page.row(
        t(ctx, "shares_outstanding"),
        &format::money_whole(f.shares_outstanding),
    );
}

fn write_summary_section(page: &mut PageWriter, ctx: &ReportContext<'_>) {
    let report = ctx.report;
    page.heading(t(ctx, "valuation_summary"));
    // The table is written as one block.
    page.check_page_break(LINE_HEIGHT * (report.models.len() as f64 + 3.0));
    page.header_row(t(ctx, "model"), t(ctx, "fair_value"), t(ctx, "upside"));
    for outcome in &report.models {
        match &outcome.result {
            Ok(result) => {
                let upside = ctx
                    .financials
                    .upside(result.share_value)
                    .map_or_else(|| t(ctx, "not_available").to_string(), format::signed_percent);
                page.row3(
                    result.model.label(),
                    &format::money(result.share_value),
                    &upside,
                );
            }
            Err(_) => {
                page.row3(
                    outcome.model.label(),
                    t(ctx, "not_available"),
                    t(ctx, "not_available"),
                );
            }
        }
    }
    match &report.weighted_average {
        Ok(weighted) => page.header_row(
            t(ctx, "weighted_average"),
            &format::money(*weighted),
            &report
                .recommendation
                .map_or(String::new(), |r| r.label().to_string()),
        ),
        Err(err) => page.row3(
            t(ctx, "weighted_average"),
            t(ctx, "not_available"),
            &err.to_string(),
        ),
    }
}

fn write_model_section(page: &mut PageWriter, ctx: &ReportContext<'_>, result: &ModelResult) {
    match &result.detail {
        ModelDetail::CashFlow(detail) => write_cash_flow_section(page, ctx, result, detail),
        ModelDetail::Multiple(detail) => write_multiple_section(page, ctx, result, detail),
    }
}

fn write_cash_flow_section(
    page: &mut PageWriter,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &CashFlowDetail,
) {
    for (key, value) in detail.inputs.rows() {
        page.row3(
            t(ctx, key),
            &format::money(value.or_zero()),
            value.source_tag(),
        );
    }
    page.row(
        t(ctx, "base_cash_flow"),
        &format::money(detail.base_cash_flow),
    );

    // Per-year projection table, kept together with its header.
    let years = detail.projected_cash_flows.len();
    page.check_page_break(LINE_HEIGHT * (years as f64 + 1.0));
    page.header_row(
        t(ctx, "year"),
        t(ctx, "projected_cash_flow"),
        t(ctx, "present_value"),
    );
    for (i, (projected, pv)) in detail
        .projected_cash_flows
        .iter()
        .zip(&detail.present_values)
        .enumerate()
    {
        page.row3(
            &(i + 1).to_string(),
            &format::money(*projected),
            &format::money(*pv),
        );
    }

    page.row(
        t(ctx, "terminal_value"),
        &format::money(detail.terminal_value),
    );
    page.row(t(ctx, "pv_terminal"), &format::money(detail.pv_terminal));
    if let Some(ev) = detail.enterprise_value {
        page.row(t(ctx, "enterprise_value"), &format::money(ev));
        page.row(
            t(ctx, "total_debt"),
            &format::money(detail.total_debt.unwrap_or(Decimal::ZERO)),
        );
        page.row(
            t(ctx, "cash"),
            &format::money(detail.cash.unwrap_or(Decimal::ZERO)),
        );
    }
    page.row(t(ctx, "equity_value"), &format::money(detail.equity_value));
    page.row3(
        t(ctx, "value_per_share"),
        &format::money(result.share_value),
        &audit::per_share(detail.equity_value, detail.shares_outstanding),
    );
}

fn write_multiple_section(
    page: &mut PageWriter,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &MultipleDetail,
) {
    let formula = match result.model {
        ValuationModel::JustifiedPe => audit::justified_pe(
            ctx.assumptions.payout_ratio,
            detail.implied_growth,
            ctx.assumptions.required_return,
        ),
        _ => audit::justified_pb(
            ctx.financials.roe.unwrap_or(Decimal::ZERO),
            ctx.assumptions.required_return,
        ),
    };
    page.row3(
        t(ctx, "justified_ratio"),
        &format::number(detail.ratio, 2),
        &formula,
    );
    page.row3(
        t(ctx, "basis_value"),
        &format::money(detail.basis_value.or_zero()),
        detail.basis_value.source_tag(),
    );
    page.row(
        t(ctx, "implied_growth"),
        &format::percent(detail.implied_growth),
    );
    page.row(
        t(ctx, "value_per_share"),
        &format::money(result.share_value),
    );
}

fn write_assumptions_section(page: &mut PageWriter, ctx: &ReportContext<'_>) {
    let a = ctx.assumptions;
    page.heading(t(ctx, "assumptions"));
    page.check_page_break(LINE_HEIGHT * 7.0);
    page.row(t(ctx, "revenue_growth"), &format::percent(a.revenue_growth));
    page.row(
        t(ctx, "terminal_growth"),
        &format::percent(a.terminal_growth),
    );
    page.row(t(ctx, "wacc"), &format::percent(a.wacc));
    page.row(
        t(ctx, "required_return"),
        &format::percent(a.required_return),
    );
    page.row(t(ctx, "tax_rate"), &format::percent(a.tax_rate));
    page.row(t(ctx, "projection_years"), &a.projection_years.to_string());
    page.row(t(ctx, "payout_ratio"), &format::percent(a.payout_ratio));
}

fn write_health_section(page: &mut PageWriter, ctx: &ReportContext<'_>) {
    let f = ctx.financials;
    page.heading(t(ctx, "financial_health"));
    if let Some(v) = f.revenue_ttm {
        page.row(t(ctx, "revenue_ttm"), &format::money(v));
    }
    if let Some(v) = f.net_income_ttm {
        page.row(t(ctx, "net_income_ttm"), &format::money(v));
    }
    if let Some(v) = f.ebitda_ttm {
        page.row(t(ctx, "ebitda_ttm"), &format::money(v));
    }
    if let Some(v) = f.roe {
        page.row(t(ctx, "roe"), &format::percent(v));
    }
    if let Some(v) = f.roa {
        page.row(t(ctx, "roa"), &format::percent(v));
    }
    if let Some(v) = f.debt_to_equity {
        page.row(t(ctx, "debt_to_equity"), &format::number(v, 2));
    }
}
