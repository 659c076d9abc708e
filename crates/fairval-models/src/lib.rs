//! # Fairval Models
//!
//! Valuation derivation engine:
//! - **FCFE / FCFF**: discounted cash-flow recursion, Gordon-growth terminal
//!   value, enterprise-to-equity reconciliation
//! - **Justified multiples**: P/E and P/B from ROE, payout, and required
//!   return
//! - **Blending**: weight-normalized average, summary statistics, rating
//! - **Sensitivity**: FCFF fair value over perturbed WACC / terminal growth
//! - **Gap filling**: backend-supplied detail is authoritative and used
//!   verbatim; only absent fields are reconstructed locally
//!
//! Everything here is a pure function over `fairval-core` types with no
//! I/O, no clock, and no randomness, so a derivation can be re-run
//! idempotently and compared bit-for-bit.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod dcf;
mod derive;

pub mod fcfe;
pub mod fcff;
pub mod justified;
pub mod sensitivity;
pub mod weighted;

pub use derive::derive_report;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::derive_report;
    pub use crate::weighted::{recommendation, summary_stats, weighted_average};
}
