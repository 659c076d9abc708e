//! The complete, self-consistent valuation report consumed by renderers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ModelResult, ValuationModel};
use crate::error::ValuationError;

/// One model's slot in the report: a weight plus the outcome.
///
/// A failed model keeps its slot so renderers can show an `N/A` block and
/// the failure, instead of the model silently disappearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelOutcome {
    /// Which model this slot belongs to.
    pub model: ValuationModel,
    /// Weight configured for this model.
    pub weight: Decimal,
    /// The model's result, or its per-model failure.
    pub result: Result<ModelResult, ValuationError>,
}

impl ModelOutcome {
    /// The fair value per share, if the model succeeded.
    #[must_use]
    pub fn share_value(&self) -> Option<Decimal> {
        self.result.as_ref().ok().map(|r| r.share_value)
    }
}

/// Cross-model summary statistics over the successful models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryStats {
    /// Unweighted mean of the successful share values.
    pub average: Decimal,
    /// Smallest successful share value.
    pub min: Decimal,
    /// Largest successful share value.
    pub max: Decimal,
    /// Number of models that produced a value.
    pub models_used: u32,
    /// Total number of models attempted.
    pub total_models: u32,
}

/// Textual rating derived from the blended fair value's deviation from price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Upside of 20% or more.
    StrongBuy,
    /// Upside of 5% or more.
    Buy,
    /// Within 5% of the market price.
    Hold,
    /// Downside of 5% or more.
    Sell,
    /// Downside of 20% or more.
    StrongSell,
}

impl Recommendation {
    /// Human-readable rating.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        }
    }
}

/// FCFF fair-value sensitivity over perturbed WACC and terminal growth.
///
/// `values[i][j]` pairs `wacc_percents[i]` with `growth_percents[j]`.
/// A cell is `None` when the perturbed rate pair diverges; it is rendered
/// as unavailable rather than clamped to a fabricated number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SensitivityMatrix {
    /// Row headers: WACC values, in percent.
    pub wacc_percents: Vec<Decimal>,
    /// Column headers: terminal growth values, in percent.
    pub growth_percents: Vec<Decimal>,
    /// Share values, rounded to whole units.
    pub values: Vec<Vec<Option<Decimal>>>,
}

/// The four model outcomes plus everything derived across them.
///
/// Produced once per request by the derivation engine; the renderers are
/// read-only consumers, which is what keeps the three artifact formats
/// numerically consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ValuationReport {
    /// Ticker symbol the report was derived for.
    pub symbol: String,
    /// Per-model outcomes in reporting order (always four entries).
    pub models: Vec<ModelOutcome>,
    /// Weight-normalized mean of the successful share values.
    pub weighted_average: Result<Decimal, ValuationError>,
    /// Summary statistics, when at least one model succeeded.
    pub summary: Option<SummaryStats>,
    /// Rating implied by the weighted average, when computable.
    pub recommendation: Option<Recommendation>,
    /// FCFF sensitivity matrix, when computable.
    pub sensitivity: Option<SensitivityMatrix>,
}

impl ValuationReport {
    /// Returns the outcome slot for `model`.
    ///
    /// # Panics
    ///
    /// Panics if the report is missing a model slot, which the derivation
    /// engine never produces.
    #[must_use]
    pub fn outcome(&self, model: ValuationModel) -> &ModelOutcome {
        self.models
            .iter()
            .find(|o| o.model == model)
            .expect("report contains all four model slots")
    }

    /// The fair value per share for `model`, if it succeeded.
    #[must_use]
    pub fn share_value(&self, model: ValuationModel) -> Option<Decimal> {
        self.outcome(model).share_value()
    }

    /// Iterator over the model outcomes that produced a value.
    pub fn successful(&self) -> impl Iterator<Item = (&ModelOutcome, &ModelResult)> {
        self.models
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o, r)))
    }

    /// Returns true if any model slot failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.models.iter().any(|o| o.result.is_err())
    }

    /// The first per-model failure, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&ValuationError> {
        self.models.iter().find_map(|o| o.result.as_ref().err())
    }
}
