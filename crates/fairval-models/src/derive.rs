//! Report assembly: one complete, self-consistent derivation per request.

use tracing::{debug, warn};

use fairval_core::types::{
    Assumptions, CompanyFinancials, ModelOutcome, ModelWeights, ValuationModel, ValuationPayload,
    ValuationReport,
};

use crate::{fcfe, fcff, justified, sensitivity, weighted};

/// Derives the full [`ValuationReport`] for one company.
///
/// Guarantees every model slot is populated (with a complete derivation
/// trail or with its per-model failure) and that everything cross-model
/// (weighted average, statistics, rating, sensitivity) is computed here,
/// once. Renderers must consume this output and never recompute it; that is
/// the invariant that keeps the three artifact formats numerically
/// consistent.
///
/// Pure function of its inputs: calling it twice with identical arguments
/// yields identical reports.
pub fn derive_report(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
    weights: &ModelWeights,
    payload: Option<&ValuationPayload>,
) -> ValuationReport {
    let models: Vec<ModelOutcome> = ValuationModel::ALL
        .iter()
        .map(|&model| {
            let model_payload = payload.and_then(|p| p.model(model));
            let result = match model {
                ValuationModel::Fcfe => fcfe::value(financials, assumptions, model_payload),
                ValuationModel::Fcff => fcff::value(financials, assumptions, model_payload),
                ValuationModel::JustifiedPe => {
                    justified::pe(financials, assumptions, model_payload)
                }
                ValuationModel::JustifiedPb => {
                    justified::pb(financials, assumptions, model_payload)
                }
            };
            match &result {
                Ok(r) => debug!(model = %model, share_value = %r.share_value, "model valued"),
                Err(e) => warn!(model = %model, error = %e, "model valuation failed"),
            }
            ModelOutcome {
                model,
                weight: weights.get(model),
                result,
            }
        })
        .collect();

    let weighted_average = weighted::weighted_average(&models);
    let summary = weighted::summary_stats(&models);
    let recommendation = weighted_average
        .as_ref()
        .ok()
        .and_then(|&wa| weighted::recommendation(wa, financials.current_price));
    let sensitivity = sensitivity::fcff_matrix(financials, assumptions);

    ValuationReport {
        symbol: financials.symbol.clone(),
        models,
        weighted_average,
        summary,
        recommendation,
        sensitivity,
    }
}
