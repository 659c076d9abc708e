//! Justified price multiples.
//!
//! Fair multiples derived algebraically from return on equity, payout ratio
//! and required return, applied to per-share fundamentals. Both models are
//! independent of the share count, so they keep producing values when the
//! cash-flow models cannot.

use rust_decimal::Decimal;

use fairval_core::error::{ValuationError, ValuationResult};
use fairval_core::types::{
    Assumptions, CompanyFinancials, ModelDetail, ModelPayload, ModelResult, MultipleBasis,
    MultipleDetail, Provenance, Sourced, ValuationModel,
};

/// Sustainable growth implied by retention: `ROE x (1 - payout)`.
fn implied_growth(roe: Decimal, payout_ratio: Decimal) -> Decimal {
    roe * (Decimal::ONE - payout_ratio)
}

/// Justified P/E: `payout x (1 + g) / (r - g)` applied to EPS.
pub fn pe(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
    payload: Option<&ModelPayload>,
) -> ValuationResult<ModelResult> {
    let model = ValuationModel::JustifiedPe;
    let r = assumptions.required_return;
    let payout = assumptions.payout_ratio;
    let growth = implied_growth(
        financials.roe.unwrap_or(Decimal::ZERO),
        payout,
    );

    let ratio = match payload.and_then(|p| p.ratio) {
        Some(ratio) => ratio,
        None => {
            if r <= growth {
                return Err(ValuationError::DivergentGrowth {
                    model,
                    rate: r,
                    growth,
                });
            }
            payout * (Decimal::ONE + growth) / (r - growth)
        }
    };

    let basis_value = Sourced::from_chain(None, financials.eps);
    let share_value = match payload.and_then(|p| p.share_value) {
        Some(v) => v,
        None => ratio * basis_value.or_zero(),
    };

    Ok(ModelResult {
        model,
        share_value,
        provenance: if payload.is_some() {
            Provenance::Backend
        } else {
            Provenance::Derived
        },
        detail: ModelDetail::Multiple(MultipleDetail {
            ratio,
            basis: MultipleBasis::EarningsPerShare,
            basis_value,
            implied_growth: growth,
        }),
    })
}

/// Justified P/B: `ROE / r` applied to book value per share.
pub fn pb(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
    payload: Option<&ModelPayload>,
) -> ValuationResult<ModelResult> {
    let model = ValuationModel::JustifiedPb;
    let r = assumptions.required_return;
    let roe = financials.roe.unwrap_or(Decimal::ZERO);
    let growth = implied_growth(roe, assumptions.payout_ratio);

    let ratio = match payload.and_then(|p| p.ratio) {
        Some(ratio) => ratio,
        None => {
            if r <= Decimal::ZERO {
                return Err(ValuationError::DivergentGrowth {
                    model,
                    rate: r,
                    growth: Decimal::ZERO,
                });
            }
            roe / r
        }
    };

    let basis_value = Sourced::from_chain(None, financials.book_value_per_share);
    let share_value = match payload.and_then(|p| p.share_value) {
        Some(v) => v,
        None => ratio * basis_value.or_zero(),
    };

    Ok(ModelResult {
        model,
        share_value,
        provenance: if payload.is_some() {
            Provenance::Backend
        } else {
            Provenance::Derived
        },
        detail: ModelDetail::Multiple(MultipleDetail {
            ratio,
            basis: MultipleBasis::BookValuePerShare,
            basis_value,
            implied_growth: growth,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_core::types::LineItems;
    use rust_decimal_macros::dec;

    fn snapshot() -> CompanyFinancials {
        CompanyFinancials {
            symbol: "TST".into(),
            name: "Test Co".into(),
            sector: None,
            exchange: None,
            current_price: dec!(90),
            shares_outstanding: dec!(10),
            eps: Some(dec!(8)),
            book_value_per_share: Some(dec!(50)),
            pe_ratio: None,
            pb_ratio: None,
            revenue_ttm: None,
            net_income_ttm: None,
            ebitda_ttm: None,
            roe: Some(dec!(0.15)),
            roa: None,
            debt_to_equity: None,
            line_items: LineItems::default(),
        }
    }

    #[test]
    fn test_justified_pe_formula() {
        // g = 0.15 * 0.6 = 0.09; ratio = 0.4 * 1.09 / (0.12 - 0.09)
        let a = Assumptions::default();
        let result = pe(&snapshot(), &a, None).unwrap();
        let detail = result.detail.as_multiple().unwrap();
        assert_eq!(detail.implied_growth, dec!(0.09));
        assert_eq!(detail.ratio.round_dp(4), dec!(14.5333));
        assert_eq!(result.share_value, detail.ratio * dec!(8));
    }

    #[test]
    fn test_justified_pe_divergence_guard() {
        // payout 0 pushes g = ROE = 0.15 above r = 0.12
        let a = Assumptions {
            payout_ratio: Decimal::ZERO,
            ..Assumptions::default()
        };
        let err = pe(&snapshot(), &a, None);
        assert!(matches!(err, Err(ValuationError::DivergentGrowth { .. })));
    }

    #[test]
    fn test_justified_pb_formula() {
        // ratio = 0.15 / 0.12 = 1.25; value = 1.25 * 50
        let result = pb(&snapshot(), &Assumptions::default(), None).unwrap();
        let detail = result.detail.as_multiple().unwrap();
        assert_eq!(detail.ratio, dec!(1.25));
        assert_eq!(result.share_value, dec!(62.5));
    }

    #[test]
    fn test_multiples_ignore_share_count() {
        let mut s = snapshot();
        s.shares_outstanding = Decimal::ZERO;
        assert!(pe(&s, &Assumptions::default(), None).is_ok());
        assert!(pb(&s, &Assumptions::default(), None).is_ok());
    }

    #[test]
    fn test_missing_roe_degrades_to_zero_growth() {
        let mut s = snapshot();
        s.roe = None;
        let result = pe(&s, &Assumptions::default(), None).unwrap();
        let detail = result.detail.as_multiple().unwrap();
        assert_eq!(detail.implied_growth, Decimal::ZERO);
    }
}
