//! Free cash flow to equity.

use rust_decimal::Decimal;

use fairval_core::error::{ValuationError, ValuationResult};
use fairval_core::types::{
    AppliedRates, Assumptions, CashFlowDetail, CashFlowInputs, CompanyFinancials, ModelDetail,
    ModelPayload, ModelResult, Provenance, Sourced, ValuationModel,
};

use crate::dcf;

/// Values the company on free cash flow to equity, discounted at the
/// required return on equity.
///
/// Backend-supplied detail is used verbatim; only absent pieces are
/// reconstructed from the snapshot and the assumptions.
pub fn value(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
    payload: Option<&ModelPayload>,
) -> ValuationResult<ModelResult> {
    let model = ValuationModel::Fcfe;
    let li = &financials.line_items;
    let pi = payload.and_then(|p| p.inputs.as_ref());
    let pr = payload.and_then(|p| p.assumptions.as_ref());

    let inputs = CashFlowInputs {
        net_income: Sourced::from_chain(
            pi.and_then(|i| i.net_income),
            li.net_income.or(financials.net_income_ttm),
        ),
        depreciation: Sourced::from_chain(pi.and_then(|i| i.depreciation), li.depreciation),
        net_borrowing: Some(Sourced::from_chain(
            pi.and_then(|i| i.net_borrowing),
            li.net_borrowing,
        )),
        interest_expense: None,
        working_capital_change: Sourced::from_chain(
            pi.and_then(|i| i.working_capital_change),
            li.working_capital_change,
        ),
        capex: Sourced::from_chain(pi.and_then(|i| i.capex), li.capex.map(|c| c.abs())),
    };

    let rates = AppliedRates {
        growth: pr
            .and_then(|r| r.growth)
            .unwrap_or(assumptions.revenue_growth),
        discount_rate: pr
            .and_then(|r| r.discount_rate)
            .unwrap_or(assumptions.required_return),
        terminal_growth: pr
            .and_then(|r| r.terminal_growth)
            .unwrap_or(assumptions.terminal_growth),
        projection_years: pr
            .and_then(|r| r.projection_years)
            .unwrap_or(assumptions.projection_years),
        tax_rate: None,
    };

    let base_cash_flow = payload.and_then(|p| p.base_cash_flow).unwrap_or_else(|| {
        inputs.net_income.or_zero()
            + inputs.depreciation.or_zero()
            + inputs.net_borrowing.as_ref().map_or(Decimal::ZERO, |nb| nb.or_zero())
            - inputs.working_capital_change.or_zero()
            - inputs.capex.or_zero()
    });

    let projected_cash_flows = match payload.and_then(|p| p.projected()) {
        Some(flows) => flows.to_vec(),
        None => dcf::project_flows(base_cash_flow, rates.growth, rates.projection_years),
    };
    let Some(&last_flow) = projected_cash_flows.last() else {
        return Err(ValuationError::MissingInput {
            model,
            field: "projection_years".into(),
        });
    };
    let horizon = projected_cash_flows.len() as u32;

    let discount_factors: Vec<Decimal> = (1..=horizon)
        .map(|t| dcf::discount_factor(rates.discount_rate, t))
        .collect();
    let present_values = match payload.and_then(|p| p.present()) {
        Some(pvs) if pvs.len() == projected_cash_flows.len() => pvs.to_vec(),
        _ => projected_cash_flows
            .iter()
            .zip(&discount_factors)
            .map(|(cf, df)| cf * df)
            .collect(),
    };

    let terminal_value = match payload.and_then(|p| p.terminal_value) {
        Some(tv) => tv,
        None => dcf::terminal_value(model, last_flow, rates.discount_rate, rates.terminal_growth)?,
    };
    let pv_terminal = payload
        .and_then(|p| p.pv_terminal)
        .unwrap_or_else(|| terminal_value * dcf::discount_factor(rates.discount_rate, horizon));

    let equity_value = payload
        .and_then(|p| p.equity_value)
        .unwrap_or_else(|| present_values.iter().copied().sum::<Decimal>() + pv_terminal);

    let share_value = match payload.and_then(|p| p.share_value) {
        Some(v) => v,
        None => dcf::per_share(model, equity_value, financials.shares_outstanding)?,
    };

    Ok(ModelResult {
        model,
        share_value,
        provenance: if payload.is_some() {
            Provenance::Backend
        } else {
            Provenance::Derived
        },
        detail: ModelDetail::CashFlow(CashFlowDetail {
            inputs,
            rates,
            base_cash_flow,
            projected_cash_flows,
            discount_factors,
            present_values,
            terminal_value,
            pv_terminal,
            enterprise_value: None,
            total_debt: None,
            cash: None,
            equity_value,
            shares_outstanding: financials.shares_outstanding,
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
            eps: None,
            book_value_per_share: None,
            pe_ratio: None,
            pb_ratio: None,
            revenue_ttm: None,
            net_income_ttm: None,
            ebitda_ttm: None,
            roe: None,
            roa: None,
            debt_to_equity: None,
            line_items: LineItems {
                net_income: Some(dec!(100)),
                depreciation: Some(dec!(20)),
                net_borrowing: Some(dec!(0)),
                working_capital_change: Some(dec!(10)),
                capex: Some(dec!(30)),
                ..LineItems::default()
            },
        }
    }

    fn assumptions() -> Assumptions {
        Assumptions {
            revenue_growth: dec!(0.05),
            terminal_growth: dec!(0.02),
            required_return: dec!(0.12),
            projection_years: 2,
            ..Assumptions::default()
        }
    }

    #[test]
    fn test_base_cash_flow_build_up() {
        // 100 + 20 + 0 - 10 - 30 = 80
        let result = value(&snapshot(), &assumptions(), None).unwrap();
        let detail = result.detail.as_cash_flow().unwrap();
        assert_eq!(detail.base_cash_flow, dec!(80));
        assert_eq!(
            detail
                .projected_cash_flows
                .iter()
                .map(|v| v.round_dp(1))
                .collect::<Vec<_>>(),
            vec![dec!(84.0), dec!(88.2)]
        );
        assert_eq!(
            detail
                .present_values
                .iter()
                .map(|v| v.round_dp(1))
                .collect::<Vec<_>>(),
            vec![dec!(75.0), dec!(70.3)]
        );
    }

    #[test]
    fn test_negative_capex_is_normalized_to_outflow() {
        let mut s = snapshot();
        s.line_items.capex = Some(dec!(-30));
        let result = value(&s, &assumptions(), None).unwrap();
        let detail = result.detail.as_cash_flow().unwrap();
        assert_eq!(detail.base_cash_flow, dec!(80));
    }

    #[test]
    fn test_missing_line_items_default_to_zero() {
        let mut s = snapshot();
        s.line_items.depreciation = None;
        let result = value(&s, &assumptions(), None).unwrap();
        let detail = result.detail.as_cash_flow().unwrap();
        assert!(detail.inputs.depreciation.is_missing());
        assert_eq!(detail.base_cash_flow, dec!(60));
    }

    #[test]
    fn test_backend_arrays_used_verbatim() {
        let payload = ModelPayload {
            projected_cash_flows: Some(vec![dec!(84), dec!(88.2)]),
            present_values: Some(vec![dec!(75.0), dec!(70.3)]),
            ..ModelPayload::default()
        };
        let result = value(&snapshot(), &assumptions(), Some(&payload)).unwrap();
        let detail = result.detail.as_cash_flow().unwrap();
        // Used verbatim, not recomputed to full precision.
        assert_eq!(detail.present_values, vec![dec!(75.0), dec!(70.3)]);
        assert_eq!(result.provenance, Provenance::Backend);
    }

    #[test]
    fn test_zero_shares_is_fatal() {
        let mut s = snapshot();
        s.shares_outstanding = Decimal::ZERO;
        let err = value(&s, &assumptions(), None);
        assert!(matches!(
            err,
            Err(ValuationError::DivisionByZeroShares { .. })
        ));
    }

    #[test]
    fn test_divergent_growth_is_fatal() {
        let mut a = assumptions();
        a.required_return = dec!(0.08);
        a.terminal_growth = dec!(0.08);
        let err = value(&snapshot(), &a, None);
        assert!(matches!(err, Err(ValuationError::DivergentGrowth { .. })));
    }
}
