//! Free cash flow to firm.

use rust_decimal::Decimal;

use fairval_core::error::{ValuationError, ValuationResult};
use fairval_core::types::{
    AppliedRates, Assumptions, CashFlowDetail, CashFlowInputs, CompanyFinancials, ModelDetail,
    ModelPayload, ModelResult, Provenance, Sourced, ValuationModel,
};

use crate::dcf;

/// Values the company on free cash flow to firm, discounted at WACC.
///
/// The firm-level build-up adds back interest net of tax in place of the
/// FCFE net-borrowing term; the resulting enterprise value is reconciled to
/// equity by subtracting net debt (total debt less cash).
pub fn value(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
    payload: Option<&ModelPayload>,
) -> ValuationResult<ModelResult> {
    let model = ValuationModel::Fcff;
    let li = &financials.line_items;
    let pi = payload.and_then(|p| p.inputs.as_ref());
    let pr = payload.and_then(|p| p.assumptions.as_ref());

    let inputs = CashFlowInputs {
        net_income: Sourced::from_chain(
            pi.and_then(|i| i.net_income),
            li.net_income.or(financials.net_income_ttm),
        ),
        depreciation: Sourced::from_chain(pi.and_then(|i| i.depreciation), li.depreciation),
        net_borrowing: None,
        interest_expense: Some(Sourced::from_chain(
            pi.and_then(|i| i.interest_expense),
            li.interest_expense,
        )),
        working_capital_change: Sourced::from_chain(
            pi.and_then(|i| i.working_capital_change),
            li.working_capital_change,
        ),
        capex: Sourced::from_chain(pi.and_then(|i| i.capex), li.capex.map(|c| c.abs())),
    };

    let rates = AppliedRates {
        growth: pr
            .and_then(|r| r.growth)
            .unwrap_or(assumptions.revenue_growth),
        discount_rate: pr
            .and_then(|r| r.discount_rate)
            .unwrap_or(assumptions.wacc),
        terminal_growth: pr
            .and_then(|r| r.terminal_growth)
            .unwrap_or(assumptions.terminal_growth),
        projection_years: pr
            .and_then(|r| r.projection_years)
            .unwrap_or(assumptions.projection_years),
        tax_rate: Some(pr.and_then(|r| r.tax_rate).unwrap_or(assumptions.tax_rate)),
    };
    let tax_rate = rates.tax_rate.unwrap_or(Decimal::ZERO);

    let interest_after_tax = inputs
        .interest_expense
        .as_ref()
        .map_or(Decimal::ZERO, |ie| ie.or_zero().abs())
        * (Decimal::ONE - tax_rate);

    let base_cash_flow = payload.and_then(|p| p.base_cash_flow).unwrap_or_else(|| {
        inputs.net_income.or_zero() + inputs.depreciation.or_zero() + interest_after_tax
            - inputs.working_capital_change.or_zero()
            - inputs.capex.or_zero()
    });

    let projected_cash_flows = match payload.and_then(|p| p.projected()) {
        Some(flows) => flows.to_vec(),
        None => dcf::project_flows(base_cash_flow, rates.growth, rates.projection_years),
    };
    let Some(&last_flow) = projected_cash_flows.last() else {
        return Err(ValuationError::MissingInput {
            model,
            field: "projection_years".into(),
        });
    };
    let horizon = projected_cash_flows.len() as u32;

    let discount_factors: Vec<Decimal> = (1..=horizon)
        .map(|t| dcf::discount_factor(rates.discount_rate, t))
        .collect();
    let present_values = match payload.and_then(|p| p.present()) {
        Some(pvs) if pvs.len() == projected_cash_flows.len() => pvs.to_vec(),
        _ => projected_cash_flows
            .iter()
            .zip(&discount_factors)
            .map(|(cf, df)| cf * df)
            .collect(),
    };

    let terminal_value = match payload.and_then(|p| p.terminal_value) {
        Some(tv) => tv,
        None => dcf::terminal_value(model, last_flow, rates.discount_rate, rates.terminal_growth)?,
    };
    let pv_terminal = payload
        .and_then(|p| p.pv_terminal)
        .unwrap_or_else(|| terminal_value * dcf::discount_factor(rates.discount_rate, horizon));

    let enterprise_value = payload
        .and_then(|p| p.enterprise_value)
        .unwrap_or_else(|| present_values.iter().copied().sum::<Decimal>() + pv_terminal);

    let total_debt = Sourced::from_chain(pi.and_then(|i| i.total_debt), li.total_debt);
    let cash = Sourced::from_chain(pi.and_then(|i| i.cash), li.cash);
    let net_debt = total_debt.or_zero() - cash.or_zero();

    let equity_value = payload
        .and_then(|p| p.equity_value)
        .unwrap_or_else(|| enterprise_value - net_debt);

    let share_value = match payload.and_then(|p| p.share_value) {
        Some(v) => v,
        None => dcf::per_share(model, equity_value, financials.shares_outstanding)?,
    };

    Ok(ModelResult {
        model,
        share_value,
        provenance: if payload.is_some() {
            Provenance::Backend
        } else {
            Provenance::Derived
        },
        detail: ModelDetail::CashFlow(CashFlowDetail {
            inputs,
            rates,
            base_cash_flow,
            projected_cash_flows,
            discount_factors,
            present_values,
            terminal_value,
            pv_terminal,
            enterprise_value: Some(enterprise_value),
            total_debt: Some(total_debt.or_zero()),
            cash: Some(cash.or_zero()),
            equity_value,
            shares_outstanding: financials.shares_outstanding,
        }),
    })
}
