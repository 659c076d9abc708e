//! Error taxonomy for valuation derivation.
//!
//! Numeric failures are per-model: a `DivergentGrowth` in the FCFE block must
//! not stop the justified-multiple models from producing values. Renderers
//! decide how a per-model failure surfaces (an `N/A` block, or aborting the
//! whole artifact for single-record formats).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ValuationModel;

/// Unified error type for valuation derivation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValuationError {
    /// A required numeric field is absent and no fallback is defined.
    ///
    /// Line-item gaps are tolerated (treated as zero and recorded as
    /// [`Sourced::Missing`](crate::types::Sourced::Missing)); this variant is
    /// raised only when a model cannot proceed at all.
    #[error("{model}: required input `{field}` is missing and has no fallback")]
    MissingInput {
        /// Model that required the field.
        model: ValuationModel,
        /// Name of the missing field.
        field: String,
    },

    /// Discount rate does not exceed the growth rate in a perpetuity formula.
    #[error("{model}: discount rate {rate} must exceed terminal growth {growth}")]
    DivergentGrowth {
        /// Model whose terminal value or justified multiple diverged.
        model: ValuationModel,
        /// Discount rate (required return or WACC) as a decimal fraction.
        rate: Decimal,
        /// Growth rate as a decimal fraction.
        growth: Decimal,
    },

    /// Shares outstanding is zero or negative, so no per-share value exists.
    #[error("{model}: shares outstanding {shares} must be positive")]
    DivisionByZeroShares {
        /// Model that attempted the per-share division.
        model: ValuationModel,
        /// The offending share count.
        shares: Decimal,
    },

    /// Every applicable model weight is zero: the weighted average is undefined.
    #[error("weighted average undefined: applicable model weights sum to zero")]
    ZeroWeightSum,
}

/// Result type alias for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;
