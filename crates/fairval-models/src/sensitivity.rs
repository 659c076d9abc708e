//! FCFF fair-value sensitivity to the discount and perpetuity rates.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fairval_core::types::{Assumptions, CompanyFinancials, SensitivityMatrix};

use crate::fcff;

const STEPS: [Decimal; 5] = [
    dec!(-0.01),
    dec!(-0.005),
    dec!(0),
    dec!(0.005),
    dec!(0.01),
];

/// Recomputes the FCFF share value over WACC ± 1% and terminal growth ± 1%
/// in 0.5% steps.
///
/// Each cell is a fresh local derivation; backend detail is pinned to the
/// base rates and cannot be reused under perturbed ones. A perturbed pair
/// that diverges leaves its cell empty. Returns `None` when no cell could
/// be computed at all.
pub fn fcff_matrix(
    financials: &CompanyFinancials,
    assumptions: &Assumptions,
) -> Option<SensitivityMatrix> {
    let wacc_range: Vec<Decimal> = STEPS.iter().map(|s| assumptions.wacc + s).collect();
    let growth_range: Vec<Decimal> = STEPS
        .iter()
        .map(|s| assumptions.terminal_growth + s)
        .collect();

    let mut any_value = false;
    let values: Vec<Vec<Option<Decimal>>> = wacc_range
        .iter()
        .map(|&wacc| {
            growth_range
                .iter()
                .map(|&terminal_growth| {
                    let perturbed = Assumptions {
                        wacc,
                        terminal_growth,
                        ..*assumptions
                    };
                    let cell = fcff::value(financials, &perturbed, None)
                        .ok()
                        .map(|r| r.share_value.round_dp(0));
                    any_value |= cell.is_some();
                    cell
                })
                .collect()
        })
        .collect();

    if !any_value {
        return None;
    }

    Some(SensitivityMatrix {
        wacc_percents: wacc_range
            .iter()
            .map(|w| (w * dec!(100)).round_dp(1))
            .collect(),
        growth_percents: growth_range
            .iter()
            .map(|g| (g * dec!(100)).round_dp(1))
            .collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_core::types::LineItems;

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
                working_capital_change: Some(dec!(10)),
                capex: Some(dec!(30)),
                ..LineItems::default()
            },
        }
    }

    #[test]
    fn test_matrix_shape_and_headers() {
        let m = fcff_matrix(&snapshot(), &Assumptions::default()).unwrap();
        assert_eq!(m.wacc_percents, vec![
            dec!(9.0),
            dec!(9.5),
            dec!(10.0),
            dec!(10.5),
            dec!(11.0)
        ]);
        assert_eq!(m.growth_percents, vec![
            dec!(1.0),
            dec!(1.5),
            dec!(2.0),
            dec!(2.5),
            dec!(3.0)
        ]);
        assert_eq!(m.values.len(), 5);
        assert!(m.values.iter().all(|row| row.len() == 5));
        // All rate pairs converge at the default assumptions.
        assert!(m.values.iter().flatten().all(Option::is_some));
    }

    #[test]
    fn test_divergent_cells_are_left_empty() {
        // WACC 2%: the (1%, g=3%) corner has wacc - 1% = 1% <= 3%.
        let a = Assumptions {
            wacc: dec!(0.02),
            ..Assumptions::default()
        };
        let m = fcff_matrix(&snapshot(), &a).unwrap();
        assert!(m.values[0][4].is_none());
        assert!(m.values[4][0].is_some());
    }
}
