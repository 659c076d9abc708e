//! Multi-sheet workbook renderer.
//!
//! One worksheet per model plus a summary dashboard, an assumptions sheet,
//! and the sensitivity matrix. The layout invariant: every derived numeric
//! cell carries an adjacent plain-text formula annotation instantiated with
//! the labels and numbers of its operands, so a reader can audit the sheet
//! back to its formulas without the source code. Raw inputs instead carry a
//! provenance tag (backend / derived / missing).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use fairval_core::types::{
    CashFlowDetail, ModelDetail, ModelOutcome, ModelResult, MultipleDetail, Sourced,
    ValuationModel,
};

use crate::audit;
use crate::context::ReportContext;
use crate::error::ReportResult;
use crate::labels;
use crate::registry::{Artifact, ReportFormat, ReportRenderer};

/// Formats shared across all sheets.
struct SheetFormats {
    title: Format,
    header: Format,
    label: Format,
    money: Format,
    number: Format,
    percent: Format,
    formula: Format,
    tag: Format,
}

impl SheetFormats {
    fn new() -> Self {
        Self {
            title: Format::new().set_bold().set_font_size(14),
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0xD9E1F2)),
            label: Format::new().set_bold(),
            money: Format::new().set_num_format("#,##0.00"),
            number: Format::new().set_num_format("0.0000"),
            percent: Format::new().set_num_format("0.00%"),
            formula: Format::new()
                .set_italic()
                .set_font_color(Color::RGB(0x808080)),
            tag: Format::new().set_font_color(Color::RGB(0x4472C4)),
        }
    }
}

/// The workbook renderer (feature `workbook`).
#[derive(Debug, Default)]
pub struct WorkbookRenderer;

impl WorkbookRenderer {
    /// Creates the renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for WorkbookRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Workbook
    }

    fn render(&self, ctx: &ReportContext<'_>) -> ReportResult<Artifact> {
        let fmts = SheetFormats::new();
        let mut workbook = Workbook::new();

        write_summary_sheet(workbook.add_worksheet(), ctx, &fmts)?;
        write_assumptions_sheet(workbook.add_worksheet(), ctx, &fmts)?;
        for outcome in &ctx.report.models {
            write_model_sheet(workbook.add_worksheet(), ctx, outcome, &fmts)?;
        }
        if ctx.report.sensitivity.is_some() {
            write_sensitivity_sheet(workbook.add_worksheet(), ctx, &fmts)?;
        }

        let bytes = workbook.save_to_buffer()?;
        Ok(Artifact {
            format: ReportFormat::Workbook,
            bytes,
        })
    }
}

fn t(ctx: &ReportContext<'_>, key: &'static str) -> &'static str {
    labels::text(key, ctx.language)
}

/// Worksheet names must avoid `/` and other reserved characters.
fn sheet_name(model: ValuationModel) -> &'static str {
    match model {
        ValuationModel::Fcfe => "FCFE",
        ValuationModel::Fcff => "FCFF",
        ValuationModel::JustifiedPe => "Justified PE",
        ValuationModel::JustifiedPb => "Justified PB",
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Writes `label | value` and returns the next row.
fn label_money_row(
    ws: &mut Worksheet,
    row: u32,
    label: &str,
    value: Decimal,
    fmts: &SheetFormats,
) -> ReportResult<u32> {
    ws.write_string_with_format(row, 0, label, &fmts.label)?;
    ws.write_number_with_format(row, 1, to_f64(value), &fmts.money)?;
    Ok(row + 1)
}

/// Writes `label | value | formula annotation` and returns the next row.
fn audited_money_row(
    ws: &mut Worksheet,
    row: u32,
    label: &str,
    value: Decimal,
    formula: &str,
    fmts: &SheetFormats,
) -> ReportResult<u32> {
    ws.write_string_with_format(row, 0, label, &fmts.label)?;
    ws.write_number_with_format(row, 1, to_f64(value), &fmts.money)?;
    ws.write_string_with_format(row, 2, formula, &fmts.formula)?;
    Ok(row + 1)
}

/// Writes `label | value | provenance tag` for a raw input row.
fn input_row(
    ws: &mut Worksheet,
    row: u32,
    label: &str,
    value: &Sourced<Decimal>,
    fmts: &SheetFormats,
) -> ReportResult<u32> {
    ws.write_string(row, 0, label)?;
    ws.write_number_with_format(row, 1, to_f64(value.or_zero()), &fmts.money)?;
    ws.write_string_with_format(row, 2, value.source_tag(), &fmts.tag)?;
    Ok(row + 1)
}

fn write_summary_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    ws.set_name("Summary")?;
    ws.set_column_width(0, 28)?;
    ws.set_column_width(1, 18)?;
    ws.set_column_width(2, 12)?;
    ws.set_column_width(3, 12)?;
    ws.set_column_width(4, 46)?;

    let f = ctx.financials;
    let title = format!("{} - {}", t(ctx, "report_title"), f.symbol);
    ws.write_string_with_format(0, 0, &title, &fmts.title)?;
    ws.write_string(1, 0, t(ctx, "generated"))?;
    ws.write_string(1, 1, &ctx.as_of.format("%Y-%m-%d").to_string())?;

    let mut row = 3;
    ws.write_string_with_format(row, 0, t(ctx, "company_info"), &fmts.header)?;
    row += 1;
    ws.write_string(row, 0, t(ctx, "company_name"))?;
    ws.write_string(row, 1, &f.name)?;
    row += 1;
    if let Some(sector) = &f.sector {
        ws.write_string(row, 0, t(ctx, "sector"))?;
        ws.write_string(row, 1, sector)?;
        row += 1;
    }
    if let Some(exchange) = &f.exchange {
        ws.write_string(row, 0, t(ctx, "exchange"))?;
        ws.write_string(row, 1, exchange)?;
        row += 1;
    }
    row = label_money_row(ws, row, t(ctx, "current_price"), f.current_price, fmts)?;
    row = label_money_row(
        ws,
        row,
        t(ctx, "shares_outstanding"),
        f.shares_outstanding,
        fmts,
    )?;

    row += 1;
    ws.write_string_with_format(row, 0, t(ctx, "valuation_summary"), &fmts.header)?;
    row += 1;
    for (col, key) in ["model", "fair_value", "weight", "upside", "source"]
        .into_iter()
        .enumerate()
    {
        ws.write_string_with_format(row, col as u16, t(ctx, key), &fmts.header)?;
    }
    row += 1;
    for outcome in &ctx.report.models {
        ws.write_string(row, 0, outcome.model.label())?;
        match &outcome.result {
            Ok(result) => {
                ws.write_number_with_format(row, 1, to_f64(result.share_value), &fmts.money)?;
                ws.write_number(row, 2, to_f64(outcome.weight))?;
                if let Some(upside) = f.upside(result.share_value) {
                    ws.write_number_with_format(row, 3, to_f64(upside), &fmts.percent)?;
                }
                let tag = match result.provenance {
                    fairval_core::types::Provenance::Backend => "backend",
                    fairval_core::types::Provenance::Derived => "derived",
                };
                ws.write_string_with_format(row, 4, tag, &fmts.tag)?;
            }
            Err(err) => {
                ws.write_string(row, 1, t(ctx, "not_available"))?;
                ws.write_string_with_format(row, 4, &err.to_string(), &fmts.formula)?;
            }
        }
        row += 1;
    }

    row += 1;
    match &ctx.report.weighted_average {
        Ok(weighted) => {
            let terms: Vec<(Decimal, Decimal)> = ctx
                .report
                .successful()
                .map(|(o, r)| (r.share_value, o.weight))
                .collect();
            row = audited_money_row(
                ws,
                row,
                t(ctx, "weighted_average"),
                *weighted,
                &audit::weighted_average(&terms),
                fmts,
            )?;
        }
        Err(err) => {
            ws.write_string_with_format(row, 0, t(ctx, "weighted_average"), &fmts.label)?;
            ws.write_string(row, 1, t(ctx, "not_available"))?;
            ws.write_string_with_format(row, 2, &err.to_string(), &fmts.formula)?;
            row += 1;
        }
    }
    if let Some(rating) = ctx.report.recommendation {
        ws.write_string_with_format(row, 0, t(ctx, "recommendation"), &fmts.label)?;
        ws.write_string(row, 1, rating.label())?;
        row += 1;
    }

    if let Some(stats) = &ctx.report.summary {
        row += 1;
        ws.write_string_with_format(row, 0, t(ctx, "summary_stats"), &fmts.header)?;
        row += 1;
        row = label_money_row(ws, row, t(ctx, "average"), stats.average, fmts)?;
        row = label_money_row(ws, row, t(ctx, "minimum"), stats.min, fmts)?;
        row = label_money_row(ws, row, t(ctx, "maximum"), stats.max, fmts)?;
        ws.write_string(row, 0, t(ctx, "models_used"))?;
        ws.write_string(row, 1, &format!("{}/{}", stats.models_used, stats.total_models))?;
    }
    Ok(())
}

fn write_assumptions_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    ws.set_name("Assumptions")?;
    ws.set_column_width(0, 28)?;
    ws.set_column_width(1, 14)?;

    let a = ctx.assumptions;
    ws.write_string_with_format(0, 0, t(ctx, "assumptions"), &fmts.title)?;

    let percent_rows = [
        ("revenue_growth", a.revenue_growth),
        ("terminal_growth", a.terminal_growth),
        ("wacc", a.wacc),
        ("required_return", a.required_return),
        ("tax_rate", a.tax_rate),
        ("payout_ratio", a.payout_ratio),
    ];
    let mut row = 2;
    for (key, value) in percent_rows {
        ws.write_string(row, 0, t(ctx, key))?;
        ws.write_number_with_format(row, 1, to_f64(value), &fmts.percent)?;
        row += 1;
    }
    ws.write_string(row, 0, t(ctx, "projection_years"))?;
    ws.write_number(row, 1, f64::from(a.projection_years))?;
    row += 1;

    row += 1;
    ws.write_string_with_format(row, 0, t(ctx, "weight"), &fmts.header)?;
    row += 1;
    for model in ValuationModel::ALL {
        ws.write_string(row, 0, model.label())?;
        ws.write_number(row, 1, to_f64(ctx.weights.get(model)))?;
        row += 1;
    }
    Ok(())
}

fn write_model_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    outcome: &ModelOutcome,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    ws.set_name(sheet_name(outcome.model))?;
    ws.set_column_width(0, 30)?;
    ws.set_column_width(1, 18)?;
    ws.set_column_width(2, 14)?;
    ws.set_column_width(3, 18)?;
    ws.set_column_width(4, 48)?;

    ws.write_string_with_format(0, 0, outcome.model.label(), &fmts.title)?;

    match &outcome.result {
        Ok(result) => match &result.detail {
            ModelDetail::CashFlow(detail) => write_cash_flow_sheet(ws, ctx, result, detail, fmts),
            ModelDetail::Multiple(detail) => write_multiple_sheet(ws, ctx, result, detail, fmts),
        },
        Err(err) => {
            // Per-model failure: this sheet degrades, the others continue.
            ws.write_string_with_format(2, 0, t(ctx, "value_per_share"), &fmts.label)?;
            ws.write_string(2, 1, t(ctx, "not_available"))?;
            ws.write_string_with_format(3, 0, &err.to_string(), &fmts.formula)?;
            Ok(())
        }
    }
}

fn write_cash_flow_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &CashFlowDetail,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    let mut row = 2;
    ws.write_string_with_format(row, 0, t(ctx, "inputs"), &fmts.header)?;
    row += 1;
    for (key, value) in detail.inputs.rows() {
        row = input_row(ws, row, t(ctx, key), value, fmts)?;
    }

    let rates = &detail.rates;
    ws.write_string(row, 0, t(ctx, "revenue_growth"))?;
    ws.write_number_with_format(row, 1, to_f64(rates.growth), &fmts.percent)?;
    row += 1;
    ws.write_string(row, 0, t(ctx, "discount_rate"))?;
    ws.write_number_with_format(row, 1, to_f64(rates.discount_rate), &fmts.percent)?;
    row += 1;
    ws.write_string(row, 0, t(ctx, "terminal_growth"))?;
    ws.write_number_with_format(row, 1, to_f64(rates.terminal_growth), &fmts.percent)?;
    row += 1;
    if let Some(tax) = rates.tax_rate {
        ws.write_string(row, 0, t(ctx, "tax_rate"))?;
        ws.write_number_with_format(row, 1, to_f64(tax), &fmts.percent)?;
        row += 1;
    }

    row = audited_money_row(
        ws,
        row,
        t(ctx, "base_cash_flow"),
        detail.base_cash_flow,
        &audit::base_cash_flow(result.model, detail),
        fmts,
    )?;

    row += 1;
    ws.write_string_with_format(row, 0, t(ctx, "projections"), &fmts.header)?;
    row += 1;
    for (col, key) in [
        "year",
        "projected_cash_flow",
        "discount_factor",
        "present_value",
        "formula",
    ]
    .into_iter()
    .enumerate()
    {
        ws.write_string_with_format(row, col as u16, t(ctx, key), &fmts.header)?;
    }
    row += 1;
    for (i, ((projected, df), pv)) in detail
        .projected_cash_flows
        .iter()
        .zip(&detail.discount_factors)
        .zip(&detail.present_values)
        .enumerate()
    {
        let year = i as u32 + 1;
        ws.write_number(row, 0, f64::from(year))?;
        ws.write_number_with_format(row, 1, to_f64(*projected), &fmts.money)?;
        ws.write_number_with_format(row, 2, to_f64(*df), &fmts.number)?;
        ws.write_number_with_format(row, 3, to_f64(*pv), &fmts.money)?;
        let formula = format!(
            "{}; {}",
            audit::projection(detail.base_cash_flow, rates.growth, year),
            audit::present_value(*projected, *df)
        );
        ws.write_string_with_format(row, 4, &formula, &fmts.formula)?;
        row += 1;
    }

    row += 1;
    let last_flow = detail
        .projected_cash_flows
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO);
    row = audited_money_row(
        ws,
        row,
        t(ctx, "terminal_value"),
        detail.terminal_value,
        &audit::terminal_value(last_flow, rates.discount_rate, rates.terminal_growth),
        fmts,
    )?;
    row = audited_money_row(
        ws,
        row,
        t(ctx, "pv_terminal"),
        detail.pv_terminal,
        &audit::pv_terminal(
            detail.terminal_value,
            rates.discount_rate,
            detail.projected_cash_flows.len() as u32,
        ),
        fmts,
    )?;

    if let Some(ev) = detail.enterprise_value {
        row = label_money_row(ws, row, t(ctx, "enterprise_value"), ev, fmts)?;
        row = label_money_row(
            ws,
            row,
            t(ctx, "total_debt"),
            detail.total_debt.unwrap_or(Decimal::ZERO),
            fmts,
        )?;
        row = label_money_row(
            ws,
            row,
            t(ctx, "cash"),
            detail.cash.unwrap_or(Decimal::ZERO),
            fmts,
        )?;
    }
    row = audited_money_row(
        ws,
        row,
        t(ctx, "equity_value"),
        detail.equity_value,
        &audit::equity_value(result.model, detail),
        fmts,
    )?;
    row = label_money_row(
        ws,
        row,
        t(ctx, "shares_outstanding"),
        detail.shares_outstanding,
        fmts,
    )?;
    audited_money_row(
        ws,
        row,
        t(ctx, "value_per_share"),
        result.share_value,
        &audit::per_share(detail.equity_value, detail.shares_outstanding),
        fmts,
    )?;
    Ok(())
}

fn write_multiple_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &MultipleDetail,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    let ratio_formula = match result.model {
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

    let mut row = 2;
    ws.write_string_with_format(row, 0, t(ctx, "inputs"), &fmts.header)?;
    row += 1;
    row = input_row(ws, row, t(ctx, "basis_value"), &detail.basis_value, fmts)?;
    ws.write_string(row, 0, t(ctx, "implied_growth"))?;
    ws.write_number_with_format(row, 1, to_f64(detail.implied_growth), &fmts.percent)?;
    row += 1;
    ws.write_string(row, 0, t(ctx, "required_return"))?;
    ws.write_number_with_format(row, 1, to_f64(ctx.assumptions.required_return), &fmts.percent)?;
    row += 1;

    row += 1;
    ws.write_string_with_format(row, 0, t(ctx, "justified_ratio"), &fmts.label)?;
    ws.write_number_with_format(row, 1, to_f64(detail.ratio), &fmts.number)?;
    ws.write_string_with_format(row, 2, &ratio_formula, &fmts.formula)?;
    row += 1;
    audited_money_row(
        ws,
        row,
        t(ctx, "value_per_share"),
        result.share_value,
        &audit::multiple_applied(detail.ratio, detail.basis.label(), detail.basis_value.or_zero()),
        fmts,
    )?;
    Ok(())
}

fn write_sensitivity_sheet(
    ws: &mut Worksheet,
    ctx: &ReportContext<'_>,
    fmts: &SheetFormats,
) -> ReportResult<()> {
    let Some(matrix) = &ctx.report.sensitivity else {
        return Ok(());
    };
    ws.set_name("Sensitivity")?;
    ws.set_column_width(0, 24)?;

    ws.write_string_with_format(0, 0, t(ctx, "sensitivity"), &fmts.title)?;
    ws.write_string_with_format(2, 0, t(ctx, "wacc_by_growth"), &fmts.header)?;
    for (col, growth) in matrix.growth_percents.iter().enumerate() {
        ws.write_string_with_format(2, col as u16 + 1, &format!("{growth}%"), &fmts.header)?;
    }
    for (i, (wacc, row_values)) in matrix
        .wacc_percents
        .iter()
        .zip(&matrix.values)
        .enumerate()
    {
        let row = i as u32 + 3;
        ws.write_string_with_format(row, 0, &format!("{wacc}%"), &fmts.header)?;
        for (j, cell) in row_values.iter().enumerate() {
            match cell {
                Some(value) => {
                    ws.write_number_with_format(row, j as u16 + 1, to_f64(*value), &fmts.money)?;
                }
                None => {
                    ws.write_string(row, j as u16 + 1, t(ctx, "not_available"))?;
                }
            }
        }
    }
    Ok(())
}
