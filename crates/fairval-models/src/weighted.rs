//! Cross-model blending: weighted average, summary statistics, rating.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fairval_core::error::{ValuationError, ValuationResult};
use fairval_core::types::{ModelOutcome, Recommendation, SummaryStats};

/// Weight-normalized mean of the successful model values.
///
/// Divides by the raw sum of the weights actually applied, so weights need
/// not sum to 100 and zeroing one weight removes that model's contribution
/// proportionally. Fails with `ZeroWeightSum` when no weight applies
/// instead of dividing by zero.
pub fn weighted_average(outcomes: &[ModelOutcome]) -> ValuationResult<Decimal> {
    let mut numerator = Decimal::ZERO;
    let mut weight_sum = Decimal::ZERO;
    for outcome in outcomes {
        if let Ok(result) = &outcome.result {
            numerator += result.share_value * outcome.weight;
            weight_sum += outcome.weight;
        }
    }
    if weight_sum.is_zero() {
        return Err(ValuationError::ZeroWeightSum);
    }
    Ok(numerator / weight_sum)
}

/// Unweighted statistics over the successful model values.
pub fn summary_stats(outcomes: &[ModelOutcome]) -> Option<SummaryStats> {
    let values: Vec<Decimal> = outcomes.iter().filter_map(ModelOutcome::share_value).collect();
    let count = values.len() as u32;
    let (first, rest) = values.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for v in rest {
        min = min.min(*v);
        max = max.max(*v);
    }
    Some(SummaryStats {
        average: values.iter().copied().sum::<Decimal>() / Decimal::from(count),
        min,
        max,
        models_used: count,
        total_models: outcomes.len() as u32,
    })
}

/// Rating implied by the blended value's deviation from the market price.
pub fn recommendation(weighted_average: Decimal, current_price: Decimal) -> Option<Recommendation> {
    if current_price <= Decimal::ZERO {
        return None;
    }
    let upside = (weighted_average - current_price) / current_price;
    Some(if upside >= dec!(0.20) {
        Recommendation::StrongBuy
    } else if upside >= dec!(0.05) {
        Recommendation::Buy
    } else if upside > dec!(-0.05) {
        Recommendation::Hold
    } else if upside > dec!(-0.20) {
        Recommendation::Sell
    } else {
        Recommendation::StrongSell
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_core::types::{
        ModelDetail, ModelResult, MultipleBasis, MultipleDetail, Provenance, Sourced,
        ValuationModel,
    };

    fn outcome(model: ValuationModel, weight: Decimal, share_value: Decimal) -> ModelOutcome {
        ModelOutcome {
            model,
            weight,
            result: Ok(ModelResult {
                model,
                share_value,
                provenance: Provenance::Derived,
                detail: ModelDetail::Multiple(MultipleDetail {
                    ratio: Decimal::ONE,
                    basis: MultipleBasis::EarningsPerShare,
                    basis_value: Sourced::Derived(share_value),
                    implied_growth: Decimal::ZERO,
                }),
            }),
        }
    }

    fn failed(model: ValuationModel, weight: Decimal) -> ModelOutcome {
        ModelOutcome {
            model,
            weight,
            result: Err(ValuationError::DivisionByZeroShares {
                model,
                shares: Decimal::ZERO,
            }),
        }
    }

    #[test]
    fn test_weighted_average_normalizes_by_raw_sum() {
        // 40/30/20/10 over 110/90/105/95 -> 101.5
        let outcomes = vec![
            outcome(ValuationModel::Fcfe, dec!(40), dec!(110)),
            outcome(ValuationModel::Fcff, dec!(30), dec!(90)),
            outcome(ValuationModel::JustifiedPe, dec!(20), dec!(105)),
            outcome(ValuationModel::JustifiedPb, dec!(10), dec!(95)),
        ];
        assert_eq!(weighted_average(&outcomes).unwrap(), dec!(101.5));
    }

    #[test]
    fn test_failed_model_drops_out_of_the_blend() {
        let outcomes = vec![
            outcome(ValuationModel::Fcfe, dec!(50), dec!(110)),
            failed(ValuationModel::Fcff, dec!(50)),
        ];
        assert_eq!(weighted_average(&outcomes).unwrap(), dec!(110));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let outcomes = vec![
            outcome(ValuationModel::Fcfe, Decimal::ZERO, dec!(110)),
            outcome(ValuationModel::Fcff, Decimal::ZERO, dec!(90)),
        ];
        assert!(matches!(
            weighted_average(&outcomes),
            Err(ValuationError::ZeroWeightSum)
        ));
    }

    #[test]
    fn test_summary_stats() {
        let outcomes = vec![
            outcome(ValuationModel::Fcfe, dec!(25), dec!(110)),
            outcome(ValuationModel::Fcff, dec!(25), dec!(90)),
            failed(ValuationModel::JustifiedPe, dec!(25)),
        ];
        let stats = summary_stats(&outcomes).unwrap();
        assert_eq!(stats.average, dec!(100));
        assert_eq!(stats.min, dec!(90));
        assert_eq!(stats.max, dec!(110));
        assert_eq!(stats.models_used, 2);
        assert_eq!(stats.total_models, 3);
    }

    #[test]
    fn test_recommendation_bands() {
        let price = dec!(100);
        assert_eq!(
            recommendation(dec!(125), price),
            Some(Recommendation::StrongBuy)
        );
        assert_eq!(recommendation(dec!(110), price), Some(Recommendation::Buy));
        assert_eq!(recommendation(dec!(100), price), Some(Recommendation::Hold));
        assert_eq!(recommendation(dec!(90), price), Some(Recommendation::Sell));
        assert_eq!(
            recommendation(dec!(75), price),
            Some(Recommendation::StrongSell)
        );
    }
}
