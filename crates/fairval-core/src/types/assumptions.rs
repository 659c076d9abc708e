//! User-editable valuation assumptions and model weights.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ValuationModel;

/// Valuation assumptions applied across the four models.
///
/// Rates are decimal fractions (`0.05` = 5%). Only presence is validated;
/// harmful combinations (discount rate at or below terminal growth) are
/// caught at use-site by the divergence guards, which can name the model and
/// the offending rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Assumptions {
    /// Short-term (explicit-horizon) growth rate.
    pub revenue_growth: Decimal,
    /// Perpetuity growth rate beyond the projection horizon.
    pub terminal_growth: Decimal,
    /// Weighted average cost of capital, the FCFF discount rate.
    pub wacc: Decimal,
    /// Required return on equity, the FCFE / justified-multiple discount rate.
    pub required_return: Decimal,
    /// Corporate tax rate applied to the FCFF interest add-back.
    pub tax_rate: Decimal,
    /// Number of explicitly projected years.
    pub projection_years: u32,
    /// Dividend payout ratio used by the justified multiples.
    pub payout_ratio: Decimal,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            revenue_growth: dec!(0.05),
            terminal_growth: dec!(0.02),
            wacc: dec!(0.10),
            required_return: dec!(0.12),
            tax_rate: dec!(0.20),
            projection_years: 5,
            payout_ratio: dec!(0.40),
        }
    }
}

/// Percentage weight per model for the blended fair value.
///
/// Weights need not sum to 100: the weighted average divides by the raw sum
/// of the weights actually applied. An all-zero configuration is rejected
/// with `ZeroWeightSum` rather than silently dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ModelWeights {
    /// Weight of the FCFE model.
    pub fcfe: Decimal,
    /// Weight of the FCFF model.
    pub fcff: Decimal,
    /// Weight of the justified P/E model.
    pub justified_pe: Decimal,
    /// Weight of the justified P/B model.
    pub justified_pb: Decimal,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            fcfe: dec!(25),
            fcff: dec!(25),
            justified_pe: dec!(25),
            justified_pb: dec!(25),
        }
    }
}

impl ModelWeights {
    /// Returns the weight assigned to `model`.
    #[must_use]
    pub fn get(&self, model: ValuationModel) -> Decimal {
        match model {
            ValuationModel::Fcfe => self.fcfe,
            ValuationModel::Fcff => self.fcff,
            ValuationModel::JustifiedPe => self.justified_pe,
            ValuationModel::JustifiedPb => self.justified_pb,
        }
    }

    /// Raw sum of all four weights.
    #[must_use]
    pub fn sum(&self) -> Decimal {
        self.fcfe + self.fcff + self.justified_pe + self.justified_pb
    }
}
