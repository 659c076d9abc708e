//! Wire shape of the backend's optional pre-computed valuation detail.
//!
//! The remote service reports share values in camelCase JSON and may attach
//! per-model detail arrays. Every field is optional: the derivation engine
//! fills whatever is absent and never overwrites what is present.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValuationModel;

/// Backend valuation summary as received from the data service.
///
/// Model slots are keyed snake_case; the detail fields inside each slot are
/// camelCase, matching the service's wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ValuationPayload {
    /// FCFE detail, if the backend computed it.
    pub fcfe: Option<ModelPayload>,
    /// FCFF detail, if the backend computed it.
    pub fcff: Option<ModelPayload>,
    /// Justified P/E detail, if the backend computed it.
    pub justified_pe: Option<ModelPayload>,
    /// Justified P/B detail, if the backend computed it.
    pub justified_pb: Option<ModelPayload>,
    /// Backend's own blended value; recomputed locally and not trusted.
    pub weighted_average: Option<Decimal>,
    /// Backend's textual recommendation, if any.
    pub recommendation: Option<String>,
}

impl ValuationPayload {
    /// The per-model payload for `model`, if present.
    #[must_use]
    pub fn model(&self, model: ValuationModel) -> Option<&ModelPayload> {
        match model {
            ValuationModel::Fcfe => self.fcfe.as_ref(),
            ValuationModel::Fcff => self.fcff.as_ref(),
            ValuationModel::JustifiedPe => self.justified_pe.as_ref(),
            ValuationModel::JustifiedPb => self.justified_pb.as_ref(),
        }
    }
}

/// One model's backend-computed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelPayload {
    /// Fair value per share.
    pub share_value: Option<Decimal>,
    /// Year-zero cash flow.
    pub base_cash_flow: Option<Decimal>,
    /// Projected cash flow per year; used verbatim when present.
    pub projected_cash_flows: Option<Vec<Decimal>>,
    /// Discounted cash flow per year; used verbatim when present.
    pub present_values: Option<Vec<Decimal>>,
    /// Gordon-growth terminal value.
    pub terminal_value: Option<Decimal>,
    /// Discounted terminal value.
    pub pv_terminal: Option<Decimal>,
    /// Equity value.
    pub equity_value: Option<Decimal>,
    /// FCFF enterprise value.
    pub enterprise_value: Option<Decimal>,
    /// Justified multiple.
    pub ratio: Option<Decimal>,
    /// Line items the backend actually used.
    pub inputs: Option<PayloadInputs>,
    /// Rates the backend actually used.
    pub assumptions: Option<PayloadRates>,
}

impl ModelPayload {
    /// Projected cash flows, with empty arrays treated as absent.
    #[must_use]
    pub fn projected(&self) -> Option<&[Decimal]> {
        self.projected_cash_flows
            .as_deref()
            .filter(|v| !v.is_empty())
    }

    /// Present values, with empty arrays treated as absent.
    #[must_use]
    pub fn present(&self) -> Option<&[Decimal]> {
        self.present_values.as_deref().filter(|v| !v.is_empty())
    }
}

/// Backend-reported line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadInputs {
    /// Net profit for the period.
    pub net_income: Option<Decimal>,
    /// Depreciation and amortisation.
    pub depreciation: Option<Decimal>,
    /// Proceeds less repayments of borrowings.
    pub net_borrowing: Option<Decimal>,
    /// Interest expense.
    pub interest_expense: Option<Decimal>,
    /// Working capital investment.
    pub working_capital_change: Option<Decimal>,
    /// Fixed capital investment.
    pub capex: Option<Decimal>,
    /// Total borrowings.
    pub total_debt: Option<Decimal>,
    /// Cash and cash equivalents.
    pub cash: Option<Decimal>,
}

/// Backend-reported rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayloadRates {
    /// Explicit-horizon growth rate.
    pub growth: Option<Decimal>,
    /// Discount rate actually used.
    pub discount_rate: Option<Decimal>,
    /// Perpetuity growth rate.
    pub terminal_growth: Option<Decimal>,
    /// Projection horizon in years.
    pub projection_years: Option<u32>,
    /// Tax rate applied to the FCFF interest add-back.
    pub tax_rate: Option<Decimal>,
}
