//! Flat delimited-text report.
//!
//! One tab-separated record per line, no layout state, deterministic for
//! identical inputs (the format used as a golden-file regression target).
//! Unlike the workbook and document renderers, a per-model failure aborts
//! the whole render: the text report is a single linear record and an `N/A`
//! hole would corrupt downstream diffing.

use rust_decimal::Decimal;

use fairval_core::types::{
    CashFlowDetail, ModelDetail, ModelResult, MultipleDetail, ValuationModel,
};

use crate::audit;
use crate::context::ReportContext;
use crate::error::ReportResult;
use crate::format;
use crate::labels;
use crate::registry::{Artifact, ReportFormat, ReportRenderer};

type TextWriter = csv::Writer<Vec<u8>>;

/// The always-available delimited-text renderer.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Creates the renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for TextRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn render(&self, ctx: &ReportContext<'_>) -> ReportResult<Artifact> {
        if let Some(err) = ctx.report.first_failure() {
            return Err(err.clone().into());
        }

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(Vec::new());

        write_header(&mut wtr, ctx)?;
        write_company_info(&mut wtr, ctx)?;
        write_market_data(&mut wtr, ctx)?;
        write_valuation_summary(&mut wtr, ctx)?;
        for outcome in &ctx.report.models {
            if let Ok(result) = &outcome.result {
                write_model_trail(&mut wtr, ctx, result)?;
            }
        }
        write_assumptions(&mut wtr, ctx)?;
        write_financial_health(&mut wtr, ctx)?;
        write_sensitivity(&mut wtr, ctx)?;

        let bytes = wtr
            .into_inner()
            .map_err(|e| crate::error::ReportError::TextWriter(e.to_string()))?;
        Ok(Artifact {
            format: ReportFormat::Text,
            bytes,
        })
    }
}

fn t(ctx: &ReportContext<'_>, key: &'static str) -> &'static str {
    labels::text(key, ctx.language)
}

fn sep(wtr: &mut TextWriter) -> ReportResult<()> {
    // An empty record writes a bare line terminator; a single empty field
    // would come out quoted.
    wtr.write_record(None::<&[u8]>)?;
    Ok(())
}

fn rec(wtr: &mut TextWriter, fields: &[&str]) -> ReportResult<()> {
    wtr.write_record(fields)?;
    Ok(())
}

fn write_header(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let date = ctx.as_of.format("%Y-%m-%d").to_string();
    rec(wtr, &[t(ctx, "report_title"), &ctx.report.symbol])?;
    rec(wtr, &[t(ctx, "generated"), &date])?;
    sep(wtr)
}

fn write_company_info(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let f = ctx.financials;
    rec(wtr, &[t(ctx, "company_info")])?;
    rec(wtr, &[t(ctx, "symbol"), &f.symbol])?;
    rec(wtr, &[t(ctx, "company_name"), &f.name])?;
    if let Some(sector) = &f.sector {
        rec(wtr, &[t(ctx, "sector"), sector])?;
    }
    if let Some(exchange) = &f.exchange {
        rec(wtr, &[t(ctx, "exchange"), exchange])?;
    }
    sep(wtr)
}

fn write_market_data(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let f = ctx.financials;
    rec(wtr, &[t(ctx, "market_data")])?;
    rec(wtr, &[t(ctx, "current_price"), &format::money(f.current_price)])?;
    rec(
        wtr,
        &[
            t(ctx, "shares_outstanding"),
            &format::money_whole(f.shares_outstanding),
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "market_cap"),
            &format::money_whole(f.current_price * f.shares_outstanding),
        ],
    )?;
    sep(wtr)
}

fn write_valuation_summary(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let report = ctx.report;
    rec(wtr, &[t(ctx, "valuation_summary")])?;
    rec(
        wtr,
        &[
            t(ctx, "model"),
            t(ctx, "fair_value"),
            t(ctx, "weight"),
            t(ctx, "upside"),
            t(ctx, "source"),
        ],
    )?;
    for (outcome, result) in report.successful() {
        let upside = ctx
            .financials
            .upside(result.share_value)
            .map_or_else(|| t(ctx, "not_available").to_string(), format::signed_percent);
        rec(
            wtr,
            &[
                result.model.label(),
                &format::money(result.share_value),
                &format::number(outcome.weight, 0),
                &upside,
                provenance_tag(result),
            ],
        )?;
    }

    if let Ok(weighted) = &report.weighted_average {
        let terms: Vec<(Decimal, Decimal)> = report
            .successful()
            .map(|(o, r)| (r.share_value, o.weight))
            .collect();
        rec(
            wtr,
            &[
                t(ctx, "weighted_average"),
                &format::money(*weighted),
                &audit::weighted_average(&terms),
            ],
        )?;
    }
    if let Some(rating) = report.recommendation {
        rec(wtr, &[t(ctx, "recommendation"), rating.label()])?;
    }
    if let Some(stats) = &report.summary {
        rec(wtr, &[t(ctx, "summary_stats")])?;
        rec(wtr, &[t(ctx, "average"), &format::money(stats.average)])?;
        rec(wtr, &[t(ctx, "minimum"), &format::money(stats.min)])?;
        rec(wtr, &[t(ctx, "maximum"), &format::money(stats.max)])?;
        rec(
            wtr,
            &[
                t(ctx, "models_used"),
                &format!("{}/{}", stats.models_used, stats.total_models),
            ],
        )?;
    }
    sep(wtr)
}

fn provenance_tag(result: &ModelResult) -> &'static str {
    match result.provenance {
        fairval_core::types::Provenance::Backend => "backend",
        fairval_core::types::Provenance::Derived => "derived",
    }
}

fn write_model_trail(
    wtr: &mut TextWriter,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
) -> ReportResult<()> {
    rec(wtr, &[result.model.label()])?;
    match &result.detail {
        ModelDetail::CashFlow(detail) => write_cash_flow_trail(wtr, ctx, result, detail)?,
        ModelDetail::Multiple(detail) => write_multiple_trail(wtr, ctx, result, detail)?,
    }
    sep(wtr)
}

fn write_cash_flow_trail(
    wtr: &mut TextWriter,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &CashFlowDetail,
) -> ReportResult<()> {
    rec(wtr, &[t(ctx, "inputs")])?;
    for (key, value) in detail.inputs.rows() {
        rec(
            wtr,
            &[t(ctx, key), &format::money(value.or_zero()), value.source_tag()],
        )?;
    }

    let rates = &detail.rates;
    rec(
        wtr,
        &[t(ctx, "revenue_growth"), &format::percent(rates.growth)],
    )?;
    rec(
        wtr,
        &[t(ctx, "discount_rate"), &format::percent(rates.discount_rate)],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "terminal_growth"),
            &format::percent(rates.terminal_growth),
        ],
    )?;
    if let Some(tax) = rates.tax_rate {
        rec(wtr, &[t(ctx, "tax_rate"), &format::percent(tax)])?;
    }

    rec(
        wtr,
        &[
            t(ctx, "base_cash_flow"),
            &format::money(detail.base_cash_flow),
            &audit::base_cash_flow(result.model, detail),
        ],
    )?;

    rec(
        wtr,
        &[
            t(ctx, "year"),
            t(ctx, "projected_cash_flow"),
            t(ctx, "discount_factor"),
            t(ctx, "present_value"),
        ],
    )?;
    for (i, ((projected, df), pv)) in detail
        .projected_cash_flows
        .iter()
        .zip(&detail.discount_factors)
        .zip(&detail.present_values)
        .enumerate()
    {
        let year = (i + 1).to_string();
        rec(
            wtr,
            &[
                &year,
                &format::money(*projected),
                &format::number(*df, 4),
                &format::money(*pv),
            ],
        )?;
    }

    let last_flow = detail
        .projected_cash_flows
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO);
    rec(
        wtr,
        &[
            t(ctx, "terminal_value"),
            &format::money(detail.terminal_value),
            &audit::terminal_value(last_flow, rates.discount_rate, rates.terminal_growth),
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "pv_terminal"),
            &format::money(detail.pv_terminal),
            &audit::pv_terminal(
                detail.terminal_value,
                rates.discount_rate,
                detail.projected_cash_flows.len() as u32,
            ),
        ],
    )?;

    if let Some(ev) = detail.enterprise_value {
        rec(wtr, &[t(ctx, "enterprise_value"), &format::money(ev)])?;
        rec(
            wtr,
            &[
                t(ctx, "total_debt"),
                &format::money(detail.total_debt.unwrap_or(Decimal::ZERO)),
            ],
        )?;
        rec(
            wtr,
            &[
                t(ctx, "cash"),
                &format::money(detail.cash.unwrap_or(Decimal::ZERO)),
            ],
        )?;
    }
    rec(
        wtr,
        &[
            t(ctx, "equity_value"),
            &format::money(detail.equity_value),
            &audit::equity_value(result.model, detail),
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "value_per_share"),
            &format::money(result.share_value),
            &audit::per_share(detail.equity_value, detail.shares_outstanding),
        ],
    )?;
    Ok(())
}

fn write_multiple_trail(
    wtr: &mut TextWriter,
    ctx: &ReportContext<'_>,
    result: &ModelResult,
    detail: &MultipleDetail,
) -> ReportResult<()> {
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
    rec(
        wtr,
        &[
            t(ctx, "justified_ratio"),
            &format::number(detail.ratio, 2),
            &formula,
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "basis_value"),
            &format::money(detail.basis_value.or_zero()),
            detail.basis_value.source_tag(),
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "implied_growth"),
            &format::percent(detail.implied_growth),
        ],
    )?;
    rec(
        wtr,
        &[
            t(ctx, "value_per_share"),
            &format::money(result.share_value),
            &audit::multiple_applied(
                detail.ratio,
                detail.basis.label(),
                detail.basis_value.or_zero(),
            ),
        ],
    )?;
    Ok(())
}

fn write_assumptions(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let a = ctx.assumptions;
    rec(wtr, &[t(ctx, "assumptions")])?;
    rec(
        wtr,
        &[t(ctx, "revenue_growth"), &format::percent(a.revenue_growth)],
    )?;
    rec(
        wtr,
        &[t(ctx, "terminal_growth"), &format::percent(a.terminal_growth)],
    )?;
    rec(wtr, &[t(ctx, "wacc"), &format::percent(a.wacc)])?;
    rec(
        wtr,
        &[t(ctx, "required_return"), &format::percent(a.required_return)],
    )?;
    rec(wtr, &[t(ctx, "tax_rate"), &format::percent(a.tax_rate)])?;
    rec(
        wtr,
        &[t(ctx, "projection_years"), &a.projection_years.to_string()],
    )?;
    rec(
        wtr,
        &[t(ctx, "payout_ratio"), &format::percent(a.payout_ratio)],
    )?;
    sep(wtr)
}

fn write_financial_health(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let f = ctx.financials;
    rec(wtr, &[t(ctx, "financial_health")])?;
    let money_rows: [(&str, Option<Decimal>); 5] = [
        ("revenue_ttm", f.revenue_ttm),
        ("net_income_ttm", f.net_income_ttm),
        ("ebitda_ttm", f.ebitda_ttm),
        ("eps", f.eps),
        ("book_value_per_share", f.book_value_per_share),
    ];
    for (key, value) in money_rows {
        if let Some(v) = value {
            rec(wtr, &[t(ctx, key), &format::money(v)])?;
        }
    }
    let pct_rows: [(&str, Option<Decimal>); 2] = [("roe", f.roe), ("roa", f.roa)];
    for (key, value) in pct_rows {
        if let Some(v) = value {
            rec(wtr, &[t(ctx, key), &format::percent(v)])?;
        }
    }
    let ratio_rows: [(&str, Option<Decimal>); 3] = [
        ("pe_ratio", f.pe_ratio),
        ("pb_ratio", f.pb_ratio),
        ("debt_to_equity", f.debt_to_equity),
    ];
    for (key, value) in ratio_rows {
        if let Some(v) = value {
            rec(wtr, &[t(ctx, key), &format::number(v, 2)])?;
        }
    }
    sep(wtr)
}

fn write_sensitivity(wtr: &mut TextWriter, ctx: &ReportContext<'_>) -> ReportResult<()> {
    let Some(matrix) = &ctx.report.sensitivity else {
        return Ok(());
    };
    rec(wtr, &[t(ctx, "sensitivity")])?;

    let mut header: Vec<String> = vec![t(ctx, "wacc_by_growth").to_string()];
    header.extend(matrix.growth_percents.iter().map(|g| format!("{g}%")));
    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    rec(wtr, &header_refs)?;

    for (wacc, row) in matrix.wacc_percents.iter().zip(&matrix.values) {
        let mut fields: Vec<String> = vec![format!("{wacc}%")];
        fields.extend(row.iter().map(|cell| {
            cell.map_or_else(|| t(ctx, "not_available").to_string(), format::money_whole)
        }));
        let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        rec(wtr, &field_refs)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Language;
    use chrono::NaiveDate;
    use fairval_core::types::{Assumptions, CompanyFinancials, LineItems, ModelWeights};
    use fairval_models::derive_report;
    use rust_decimal_macros::dec;

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
            pe_ratio: Some(dec!(11.2)),
            pb_ratio: Some(dec!(1.8)),
            revenue_ttm: Some(dec!(60000)),
            net_income_ttm: Some(dec!(100)),
            ebitda_ttm: Some(dec!(180)),
            roe: Some(dec!(0.15)),
            roa: Some(dec!(0.08)),
            debt_to_equity: Some(dec!(0.5)),
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

    fn render_to_string() -> String {
        let financials = snapshot();
        let assumptions = Assumptions {
            projection_years: 2,
            ..Assumptions::default()
        };
        let weights = ModelWeights::default();
        let report = derive_report(&financials, &assumptions, &weights, None);
        let ctx = ReportContext {
            financials: &financials,
            assumptions: &assumptions,
            weights: &weights,
            report: &report,
            language: Language::En,
            as_of: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        };
        let artifact = TextRenderer::new().render(&ctx).unwrap();
        String::from_utf8(artifact.bytes).unwrap()
    }

    #[test]
    fn test_report_is_deterministic() {
        assert_eq!(render_to_string(), render_to_string());
    }

    #[test]
    fn test_contains_derivation_trail() {
        let text = render_to_string();
        assert!(text.contains("Valuation Report\tVNM"));
        assert!(text.contains("Generated\t2026-08-07"));
        assert!(text.contains("Base Cash Flow\t80.00\t= 100.00 + 20.00 + 0.00 - 10.00 - 30.00"));
        assert!(text.contains("Terminal Value"));
        assert!(text.contains("Sensitivity Analysis (FCFF)"));
    }

    #[test]
    fn test_model_failure_aborts_whole_render() {
        let mut financials = snapshot();
        financials.shares_outstanding = Decimal::ZERO;
        let assumptions = Assumptions::default();
        let weights = ModelWeights::default();
        let report = derive_report(&financials, &assumptions, &weights, None);
        let ctx = ReportContext {
            financials: &financials,
            assumptions: &assumptions,
            weights: &weights,
            report: &report,
            language: Language::En,
            as_of: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        };
        let err = TextRenderer::new().render(&ctx);
        assert!(matches!(
            err,
            Err(crate::error::ReportError::Valuation(_))
        ));
    }
}
