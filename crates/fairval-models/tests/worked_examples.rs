//! End-to-end derivation checks against hand-worked numbers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fairval_core::prelude::*;
use fairval_models::derive_report;

fn snapshot() -> CompanyFinancials {
    CompanyFinancials {
        symbol: "VNM".into(),
        name: "Vinamilk".into(),
        sector: Some("Consumer Staples".into()),
        exchange: Some("HOSE".into()),
        current_price: dec!(90),
        shares_outstanding: dec!(10),
        eps: Some(dec!(8)),
        book_value_per_share: Some(dec!(50)),
        pe_ratio: Some(dec!(11.2)),
        pb_ratio: Some(dec!(1.8)),
        revenue_ttm: Some(dec!(60000)),
        net_income_ttm: Some(dec!(100)),
        ebitda_ttm: Some(dec!(180)),
        roe: Some(dec!(0.15)),
        roa: Some(dec!(0.08)),
        debt_to_equity: Some(dec!(0.5)),
        line_items: LineItems {
            net_income: Some(dec!(100)),
            depreciation: Some(dec!(20)),
            net_borrowing: Some(dec!(0)),
            working_capital_change: Some(dec!(10)),
            capex: Some(dec!(30)),
            interest_expense: Some(dec!(10)),
            total_debt: Some(dec!(300)),
            cash: Some(dec!(100)),
        },
    }
}

fn assumptions() -> Assumptions {
    Assumptions {
        revenue_growth: dec!(0.05),
        terminal_growth: dec!(0.02),
        wacc: dec!(0.10),
        required_return: dec!(0.12),
        tax_rate: dec!(0.20),
        projection_years: 2,
        payout_ratio: dec!(0.40),
    }
}

#[test]
fn fcfe_trail_matches_worked_example() {
    let report = derive_report(&snapshot(), &assumptions(), &ModelWeights::default(), None);
    let fcfe = report.outcome(ValuationModel::Fcfe).result.as_ref().unwrap();
    let detail = fcfe.detail.as_cash_flow().unwrap();

    assert_eq!(detail.base_cash_flow, dec!(80));
    let projected: Vec<Decimal> = detail
        .projected_cash_flows
        .iter()
        .map(|v| v.round_dp(1))
        .collect();
    assert_eq!(projected, vec![dec!(84.0), dec!(88.2)]);
    let pvs: Vec<Decimal> = detail.present_values.iter().map(|v| v.round_dp(1)).collect();
    assert_eq!(pvs, vec![dec!(75.0), dec!(70.3)]);

    // terminal value = 88.2 * 1.02 / (0.12 - 0.02), discounted two years
    assert_eq!(detail.terminal_value.round_dp(2), dec!(899.64));
    assert_eq!(detail.pv_terminal.round_dp(1), dec!(717.2));
    assert_eq!(
        detail.equity_value,
        detail.present_values.iter().copied().sum::<Decimal>() + detail.pv_terminal
    );
    assert_eq!(fcfe.share_value, detail.equity_value / dec!(10));
}

#[test]
fn derivation_is_idempotent() {
    let s = snapshot();
    let a = assumptions();
    let w = ModelWeights::default();
    let first = derive_report(&s, &a, &w, None);
    let second = derive_report(&s, &a, &w, None);
    assert_eq!(first, second);
}

#[test]
fn divergent_growth_fails_only_the_cash_flow_models() {
    let a = Assumptions {
        required_return: dec!(0.08),
        terminal_growth: dec!(0.08),
        wacc: dec!(0.10),
        ..assumptions()
    };
    let report = derive_report(&snapshot(), &a, &ModelWeights::default(), None);

    assert!(matches!(
        report.outcome(ValuationModel::Fcfe).result,
        Err(ValuationError::DivergentGrowth { .. })
    ));
    // FCFF discounts at WACC = 10% > 8% and still converges.
    assert!(report.outcome(ValuationModel::Fcff).result.is_ok());
    assert!(report.outcome(ValuationModel::JustifiedPb).result.is_ok());
}

#[test]
fn zero_shares_spares_the_multiple_models() {
    let mut s = snapshot();
    s.shares_outstanding = Decimal::ZERO;
    let report = derive_report(&s, &assumptions(), &ModelWeights::default(), None);

    assert!(matches!(
        report.outcome(ValuationModel::Fcfe).result,
        Err(ValuationError::DivisionByZeroShares { .. })
    ));
    assert!(matches!(
        report.outcome(ValuationModel::Fcff).result,
        Err(ValuationError::DivisionByZeroShares { .. })
    ));
    assert!(report.outcome(ValuationModel::JustifiedPe).result.is_ok());
    assert!(report.outcome(ValuationModel::JustifiedPb).result.is_ok());
}

#[test]
fn backend_share_values_survive_derivation_verbatim() {
    let payload = ValuationPayload {
        fcfe: Some(ModelPayload {
            share_value: Some(dec!(110)),
            ..ModelPayload::default()
        }),
        fcff: Some(ModelPayload {
            share_value: Some(dec!(90)),
            ..ModelPayload::default()
        }),
        justified_pe: Some(ModelPayload {
            share_value: Some(dec!(105)),
            ratio: Some(dec!(13.1)),
            ..ModelPayload::default()
        }),
        justified_pb: Some(ModelPayload {
            share_value: Some(dec!(95)),
            ratio: Some(dec!(1.9)),
            ..ModelPayload::default()
        }),
        ..ValuationPayload::default()
    };
    let weights = ModelWeights {
        fcfe: dec!(40),
        fcff: dec!(30),
        justified_pe: dec!(20),
        justified_pb: dec!(10),
    };
    let report = derive_report(&snapshot(), &assumptions(), &weights, Some(&payload));

    assert_eq!(report.share_value(ValuationModel::Fcfe), Some(dec!(110)));
    assert_eq!(
        report.outcome(ValuationModel::Fcfe).result.as_ref().unwrap().provenance,
        Provenance::Backend
    );
    // 40x110 + 30x90 + 20x105 + 10x95 over 100
    assert_eq!(*report.weighted_average.as_ref().unwrap(), dec!(101.5));
    assert_eq!(report.recommendation, Some(Recommendation::Buy));
}

#[test]
fn all_zero_weights_fail_the_blend_but_not_the_models() {
    let weights = ModelWeights {
        fcfe: Decimal::ZERO,
        fcff: Decimal::ZERO,
        justified_pe: Decimal::ZERO,
        justified_pb: Decimal::ZERO,
    };
    let report = derive_report(&snapshot(), &assumptions(), &weights, None);
    assert!(matches!(
        report.weighted_average,
        Err(ValuationError::ZeroWeightSum)
    ));
    assert!(report.models.iter().all(|o| o.result.is_ok()));
    assert!(report.summary.is_some());
}
