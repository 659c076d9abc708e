//! Provenance tagging for numeric inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value tagged with where it came from.
///
/// Every line item consumed by a cash-flow model carries its provenance so
/// renderers can flag which numbers were backend-verified and which were
/// reconstructed locally (or defaulted to zero). Replaces the implicit
/// `details.x ?? stockData.x ?? 0` fallback chain with an explicit variant.
///
/// # Example
///
/// ```rust
/// use fairval_core::types::Sourced;
/// use rust_decimal_macros::dec;
///
/// let net_income = Sourced::Authoritative(dec!(100));
/// assert!(net_income.is_authoritative());
/// assert_eq!(net_income.or_zero(), dec!(100));
/// assert_eq!(Sourced::<rust_decimal::Decimal>::Missing.or_zero(), dec!(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Sourced<T> {
    /// Supplied pre-computed by the backend; never recomputed locally.
    Authoritative(T),
    /// Reconstructed locally from the company snapshot.
    Derived(T),
    /// Absent everywhere; consumers treat the value as zero.
    Missing,
}

impl<T> Sourced<T> {
    /// Wraps an optional backend value, falling through to a local fallback.
    pub fn from_chain(backend: Option<T>, local: Option<T>) -> Self {
        match (backend, local) {
            (Some(v), _) => Sourced::Authoritative(v),
            (None, Some(v)) => Sourced::Derived(v),
            (None, None) => Sourced::Missing,
        }
    }

    /// Returns the inner value, if present.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Sourced::Authoritative(v) | Sourced::Derived(v) => Some(v),
            Sourced::Missing => None,
        }
    }

    /// Returns true if the value was supplied by the backend.
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        matches!(self, Sourced::Authoritative(_))
    }

    /// Returns true if the value is absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Sourced::Missing)
    }

    /// Short tag for report output.
    #[must_use]
    pub fn source_tag(&self) -> &'static str {
        match self {
            Sourced::Authoritative(_) => "backend",
            Sourced::Derived(_) => "derived",
            Sourced::Missing => "missing",
        }
    }
}

impl Sourced<Decimal> {
    /// Returns the value, treating an absent field as zero.
    #[must_use]
    pub fn or_zero(&self) -> Decimal {
        self.value().copied().unwrap_or(Decimal::ZERO)
    }
}

impl<T: fmt::Display> fmt::Display for Sourced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sourced::Authoritative(v) => write!(f, "{v} (backend)"),
            Sourced::Derived(v) => write!(f, "{v} (derived)"),
            Sourced::Missing => write!(f, "missing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fallback_chain_order() {
        let s = Sourced::from_chain(Some(dec!(1)), Some(dec!(2)));
        assert_eq!(s, Sourced::Authoritative(dec!(1)));

        let s = Sourced::from_chain(None, Some(dec!(2)));
        assert_eq!(s, Sourced::Derived(dec!(2)));

        let s: Sourced<Decimal> = Sourced::from_chain(None, None);
        assert_eq!(s, Sourced::Missing);
        assert_eq!(s.or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_shape() {
        let s = Sourced::Derived(dec!(80));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["source"], "derived");
    }
}
