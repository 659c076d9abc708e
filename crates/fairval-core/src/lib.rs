//! # Fairval Core
//!
//! Core types for the Fairval equity valuation engine:
//! - **Snapshot types**: [`CompanyFinancials`](types::CompanyFinancials),
//!   [`Assumptions`](types::Assumptions), [`ModelWeights`](types::ModelWeights)
//! - **Provenance**: [`Sourced`](types::Sourced), authoritative vs derived vs
//!   missing, replacing implicit fallback chains
//! - **Outputs**: [`ModelResult`](types::ModelResult) and
//!   [`ValuationReport`](types::ValuationReport), the single source of truth
//!   every renderer consumes
//! - **Wire payloads**: [`ValuationPayload`](types::ValuationPayload), the
//!   backend's optional pre-computed detail
//! - **Errors**: [`ValuationError`] taxonomy shared across the workspace
//!
//! This crate carries no calculations: the derivation lives in
//! `fairval-models`, and rendering in `fairval-report`. Keeping the types
//! lightweight lets every crate agree on one representation of a valuation.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod types;

pub use error::{ValuationError, ValuationResult};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use fairval_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::types::{
        AppliedRates, Assumptions, CashFlowDetail, CashFlowInputs, CompanyFinancials, LineItems,
        ModelDetail, ModelOutcome, ModelPayload, ModelResult, ModelWeights, MultipleBasis,
        MultipleDetail, PayloadInputs, PayloadRates, Provenance, Recommendation,
        SensitivityMatrix, Sourced, SummaryStats, ValuationModel, ValuationPayload,
        ValuationReport,
    };
}
