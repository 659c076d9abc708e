//! Formula annotations instantiated with actual numbers.
//!
//! The workbook invariant is that every derived cell carries an adjacent
//! formula string a reader can audit without the source code. The text
//! renderer reuses the same strings for its derivation trail, so the two
//! formats annotate identically.

use rust_decimal::Decimal;

use fairval_core::types::{CashFlowDetail, ValuationModel};

use crate::format;

/// Build-up of the base cash flow from its line items.
#[must_use]
pub(crate) fn base_cash_flow(model: ValuationModel, detail: &CashFlowDetail) -> String {
    let inputs = &detail.inputs;
    match model {
        ValuationModel::Fcff => format!(
            "= {} + {} + |{}| x (1 - {}) - {} - {}",
            format::money(inputs.net_income.or_zero()),
            format::money(inputs.depreciation.or_zero()),
            format::money(
                inputs
                    .interest_expense
                    .as_ref()
                    .map_or(Decimal::ZERO, |ie| ie.or_zero())
            ),
            format::percent(detail.rates.tax_rate.unwrap_or(Decimal::ZERO)),
            format::money(inputs.working_capital_change.or_zero()),
            format::money(inputs.capex.or_zero()),
        ),
        _ => format!(
            "= {} + {} + {} - {} - {}",
            format::money(inputs.net_income.or_zero()),
            format::money(inputs.depreciation.or_zero()),
            format::money(
                inputs
                    .net_borrowing
                    .as_ref()
                    .map_or(Decimal::ZERO, |nb| nb.or_zero())
            ),
            format::money(inputs.working_capital_change.or_zero()),
            format::money(inputs.capex.or_zero()),
        ),
    }
}

/// Growth compounding for year `t`.
#[must_use]
pub(crate) fn projection(base: Decimal, growth: Decimal, year: u32) -> String {
    format!(
        "= {} x (1 + {})^{}",
        format::money(base),
        format::percent(growth),
        year
    )
}

/// Present value of one projected flow.
#[must_use]
pub(crate) fn present_value(projected: Decimal, discount_factor: Decimal) -> String {
    format!(
        "= {} x {}",
        format::money(projected),
        format::number(discount_factor, 4)
    )
}

/// Gordon-growth terminal value.
#[must_use]
pub(crate) fn terminal_value(last_flow: Decimal, rate: Decimal, terminal_growth: Decimal) -> String {
    format!(
        "= {} x (1 + {}) / ({} - {})",
        format::money(last_flow),
        format::percent(terminal_growth),
        format::percent(rate),
        format::percent(terminal_growth)
    )
}

/// Discounting the terminal value back to today.
#[must_use]
pub(crate) fn pv_terminal(terminal: Decimal, rate: Decimal, years: u32) -> String {
    format!(
        "= {} x (1 + {})^-{}",
        format::money(terminal),
        format::percent(rate),
        years
    )
}

/// Equity as the sum of discounted flows (plus reconciliation for FCFF).
#[must_use]
pub(crate) fn equity_value(model: ValuationModel, detail: &CashFlowDetail) -> String {
    match (model, detail.enterprise_value) {
        (ValuationModel::Fcff, Some(ev)) => format!(
            "= {} - ({} - {})",
            format::money(ev),
            format::money(detail.total_debt.unwrap_or(Decimal::ZERO)),
            format::money(detail.cash.unwrap_or(Decimal::ZERO)),
        ),
        _ => format!(
            "= sum(PV years 1..{}) + {}",
            detail.projected_cash_flows.len(),
            format::money(detail.pv_terminal)
        ),
    }
}

/// Per-share division.
#[must_use]
pub(crate) fn per_share(equity: Decimal, shares: Decimal) -> String {
    format!(
        "= {} / {}",
        format::money(equity),
        format::money_whole(shares)
    )
}

/// Justified P/E multiple.
#[must_use]
pub(crate) fn justified_pe(payout: Decimal, growth: Decimal, rate: Decimal) -> String {
    format!(
        "= {} x (1 + {}) / ({} - {})",
        format::percent(payout),
        format::percent(growth),
        format::percent(rate),
        format::percent(growth)
    )
}

/// Justified P/B multiple.
#[must_use]
pub(crate) fn justified_pb(roe: Decimal, rate: Decimal) -> String {
    format!("= {} / {}", format::percent(roe), format::percent(rate))
}

/// Multiple applied to its per-share basis.
#[must_use]
pub(crate) fn multiple_applied(ratio: Decimal, basis_label: &str, basis: Decimal) -> String {
    format!(
        "= {} x {} ({})",
        format::number(ratio, 2),
        format::money(basis),
        basis_label
    )
}

/// Weight-normalized blend of the model values.
#[must_use]
pub(crate) fn weighted_average(numerators: &[(Decimal, Decimal)]) -> String {
    let terms: Vec<String> = numerators
        .iter()
        .map(|(value, weight)| format!("{} x {}", format::money(*value), format::number(*weight, 0)))
        .collect();
    let weight_sum: Decimal = numerators.iter().map(|(_, w)| *w).sum();
    format!(
        "= ({}) / {}",
        terms.join(" + "),
        format::number(weight_sum, 0)
    )
}
