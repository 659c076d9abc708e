//! Property tests for the blending math.

use proptest::prelude::*;
use rust_decimal::Decimal;

use fairval_core::types::{
    ModelDetail, ModelOutcome, ModelResult, MultipleBasis, MultipleDetail, Provenance, Sourced,
    ValuationModel,
};
use fairval_models::weighted::weighted_average;

fn outcome(model: ValuationModel, weight: u32, share_value: i64) -> ModelOutcome {
    let share_value = Decimal::from(share_value);
    ModelOutcome {
        model,
        weight: Decimal::from(weight),
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

fn outcomes(weights: [u32; 4], values: [i64; 4]) -> Vec<ModelOutcome> {
    ValuationModel::ALL
        .iter()
        .zip(weights)
        .zip(values)
        .map(|((&m, w), v)| outcome(m, w, v))
        .collect()
}

proptest! {
    /// The blend always lies within the range of the blended values.
    #[test]
    fn average_stays_within_value_range(
        weights in prop::array::uniform4(0u32..1000),
        values in prop::array::uniform4(1i64..1_000_000),
    ) {
        prop_assume!(weights.iter().sum::<u32>() > 0);
        let avg = weighted_average(&outcomes(weights, values)).unwrap();
        let min = Decimal::from(*values.iter().min().unwrap());
        let max = Decimal::from(*values.iter().max().unwrap());
        prop_assert!(avg >= min && avg <= max);
    }

    /// Zeroing one weight is the same as dropping that model entirely.
    #[test]
    fn zero_weight_removes_the_contribution(
        weights in prop::array::uniform4(1u32..1000),
        values in prop::array::uniform4(1i64..1_000_000),
    ) {
        let mut zeroed = weights;
        zeroed[0] = 0;
        let with_zero = weighted_average(&outcomes(zeroed, values)).unwrap();

        let reduced: Vec<ModelOutcome> = outcomes(weights, values).split_off(1);
        let without_model = weighted_average(&reduced).unwrap();

        prop_assert_eq!(with_zero, without_model);
    }

    /// Equal weights reduce the blend to the plain mean.
    #[test]
    fn uniform_weights_degenerate_to_the_mean(
        w in 1u32..1000,
        values in prop::array::uniform4(1i64..1_000_000),
    ) {
        let avg = weighted_average(&outcomes([w; 4], values)).unwrap();
        let mean = values.iter().map(|&v| Decimal::from(v)).sum::<Decimal>() / Decimal::from(4);
        prop_assert_eq!(avg, mean);
    }
}
