//! Shared discounted-cash-flow machinery for the FCFE and FCFF models.

use rust_decimal::{Decimal, MathematicalOps};

use fairval_core::error::{ValuationError, ValuationResult};
use fairval_core::types::ValuationModel;

/// `(1 + rate)^(-year)`.
#[must_use]
pub(crate) fn discount_factor(rate: Decimal, year: u32) -> Decimal {
    Decimal::ONE / (Decimal::ONE + rate).powi(i64::from(year))
}

/// Projects `base` forward at `growth` for years `1..=years`.
#[must_use]
pub(crate) fn project_flows(base: Decimal, growth: Decimal, years: u32) -> Vec<Decimal> {
    (1..=years)
        .map(|t| base * (Decimal::ONE + growth).powi(i64::from(t)))
        .collect()
}

/// Gordon-growth terminal value at the projection horizon.
///
/// The discount rate must strictly exceed the perpetuity growth rate; the
/// degenerate case is a per-model fatal error, never a clamped number.
pub(crate) fn terminal_value(
    model: ValuationModel,
    last_flow: Decimal,
    rate: Decimal,
    terminal_growth: Decimal,
) -> ValuationResult<Decimal> {
    if rate <= terminal_growth {
        return Err(ValuationError::DivergentGrowth {
            model,
            rate,
            growth: terminal_growth,
        });
    }
    Ok(last_flow * (Decimal::ONE + terminal_growth) / (rate - terminal_growth))
}

/// Divides an equity value down to a per-share figure.
pub(crate) fn per_share(
    model: ValuationModel,
    equity_value: Decimal,
    shares_outstanding: Decimal,
) -> ValuationResult<Decimal> {
    if shares_outstanding <= Decimal::ZERO {
        return Err(ValuationError::DivisionByZeroShares {
            model,
            shares: shares_outstanding,
        });
    }
    Ok(equity_value / shares_outstanding)
}
