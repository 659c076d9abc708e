//! Per-model valuation output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Sourced;

/// The four valuation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationModel {
    /// Free cash flow to equity, discounted at the required return.
    Fcfe,
    /// Free cash flow to firm, discounted at WACC.
    Fcff,
    /// Justified price/earnings multiple.
    JustifiedPe,
    /// Justified price/book multiple.
    JustifiedPb,
}

impl ValuationModel {
    /// All models, in reporting order.
    pub const ALL: [ValuationModel; 4] = [
        ValuationModel::Fcfe,
        ValuationModel::Fcff,
        ValuationModel::JustifiedPe,
        ValuationModel::JustifiedPb,
    ];

    /// Human-readable model name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ValuationModel::Fcfe => "FCFE",
            ValuationModel::Fcff => "FCFF",
            ValuationModel::JustifiedPe => "Justified P/E",
            ValuationModel::JustifiedPb => "Justified P/B",
        }
    }

    /// Stable key used in wire payloads and file layouts.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            ValuationModel::Fcfe => "fcfe",
            ValuationModel::Fcff => "fcff",
            ValuationModel::JustifiedPe => "justified_pe",
            ValuationModel::JustifiedPb => "justified_pb",
        }
    }

    /// Returns true for the discounted-cash-flow models.
    #[must_use]
    pub fn is_cash_flow(&self) -> bool {
        matches!(self, ValuationModel::Fcfe | ValuationModel::Fcff)
    }
}

impl fmt::Display for ValuationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a model result arrived pre-computed or was reconstructed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Detail arrived pre-computed from the backend.
    Backend,
    /// Detail was reconstructed locally from the company snapshot.
    Derived,
}

/// Line items actually consumed by a cash-flow model, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CashFlowInputs {
    /// Net profit for the period.
    pub net_income: Sourced<Decimal>,
    /// Depreciation and amortisation.
    pub depreciation: Sourced<Decimal>,
    /// FCFE only: proceeds less repayments of borrowings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_borrowing: Option<Sourced<Decimal>>,
    /// FCFF only: interest expense, added back net of tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_expense: Option<Sourced<Decimal>>,
    /// Working capital investment over the period.
    pub working_capital_change: Sourced<Decimal>,
    /// Fixed capital investment (outflow positive).
    pub capex: Sourced<Decimal>,
}

impl CashFlowInputs {
    /// Label/value rows in statement order, for renderers.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, &Sourced<Decimal>)> {
        let mut rows = vec![
            ("net_income", &self.net_income),
            ("depreciation", &self.depreciation),
        ];
        if let Some(nb) = &self.net_borrowing {
            rows.push(("net_borrowing", nb));
        }
        if let Some(ie) = &self.interest_expense {
            rows.push(("interest_expense", ie));
        }
        rows.push(("working_capital_change", &self.working_capital_change));
        rows.push(("capex", &self.capex));
        rows
    }
}

/// Rates actually applied by a cash-flow model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppliedRates {
    /// Explicit-horizon growth rate.
    pub growth: Decimal,
    /// Discount rate: required return for FCFE, WACC for FCFF.
    pub discount_rate: Decimal,
    /// Perpetuity growth rate.
    pub terminal_growth: Decimal,
    /// Number of explicitly projected years.
    pub projection_years: u32,
    /// FCFF only: tax rate applied to the interest add-back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

/// Full derivation trail of an FCFE or FCFF valuation.
///
/// `projected_cash_flows`, `discount_factors` and `present_values` are
/// parallel, one entry per projected year starting at year 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CashFlowDetail {
    /// Line items consumed.
    pub inputs: CashFlowInputs,
    /// Rates applied.
    pub rates: AppliedRates,
    /// Year-zero cash flow before growth.
    pub base_cash_flow: Decimal,
    /// Projected cash flow per year.
    pub projected_cash_flows: Vec<Decimal>,
    /// `(1 + r)^(-t)` per year.
    pub discount_factors: Vec<Decimal>,
    /// Discounted cash flow per year.
    pub present_values: Vec<Decimal>,
    /// Gordon-growth terminal value at the horizon.
    pub terminal_value: Decimal,
    /// Terminal value discounted to today.
    pub pv_terminal: Decimal,
    /// FCFF only: sum of present values plus discounted terminal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_value: Option<Decimal>,
    /// FCFF only: total debt subtracted in the equity reconciliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<Decimal>,
    /// FCFF only: cash added back in the equity reconciliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash: Option<Decimal>,
    /// Value attributable to equity holders.
    pub equity_value: Decimal,
    /// Share count used for the per-share division.
    pub shares_outstanding: Decimal,
}

/// Basis of a justified multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleBasis {
    /// Multiple applied to earnings per share.
    EarningsPerShare,
    /// Multiple applied to book value per share.
    BookValuePerShare,
}

impl MultipleBasis {
    /// Short label for report output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MultipleBasis::EarningsPerShare => "EPS",
            MultipleBasis::BookValuePerShare => "BVPS",
        }
    }
}

/// Derivation trail of a justified-multiple valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MultipleDetail {
    /// The justified multiple itself.
    pub ratio: Decimal,
    /// What the multiple is applied to.
    pub basis: MultipleBasis,
    /// The per-share basis value, with provenance.
    pub basis_value: Sourced<Decimal>,
    /// Sustainable growth implied by `ROE x (1 - payout)`.
    pub implied_growth: Decimal,
}

/// Method-specific derivation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelDetail {
    /// FCFE / FCFF trail.
    CashFlow(CashFlowDetail),
    /// Justified P/E / P/B trail.
    Multiple(MultipleDetail),
}

impl ModelDetail {
    /// The cash-flow trail, if this is a DCF model.
    #[must_use]
    pub fn as_cash_flow(&self) -> Option<&CashFlowDetail> {
        match self {
            ModelDetail::CashFlow(d) => Some(d),
            ModelDetail::Multiple(_) => None,
        }
    }

    /// The multiple trail, if this is a justified-multiple model.
    #[must_use]
    pub fn as_multiple(&self) -> Option<&MultipleDetail> {
        match self {
            ModelDetail::Multiple(d) => Some(d),
            ModelDetail::CashFlow(_) => None,
        }
    }
}

/// One model's complete, render-ready output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelResult {
    /// Which model produced this result.
    pub model: ValuationModel,
    /// Fair value per share.
    pub share_value: Decimal,
    /// Whether the detail was backend-computed or locally reconstructed.
    pub provenance: Provenance,
    /// Full derivation trail.
    pub detail: ModelDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporting_order_is_stable() {
        let keys: Vec<_> = ValuationModel::ALL.iter().map(|m| m.key()).collect();
        assert_eq!(keys, ["fcfe", "fcff", "justified_pe", "justified_pb"]);
    }

    #[test]
    fn test_model_classification() {
        assert!(ValuationModel::Fcfe.is_cash_flow());
        assert!(ValuationModel::Fcff.is_cash_flow());
        assert!(!ValuationModel::JustifiedPe.is_cash_flow());
        assert!(!ValuationModel::JustifiedPb.is_cash_flow());
    }
}
