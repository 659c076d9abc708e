//! Company snapshot loading.
//!
//! The snapshot file is the JSON the excluded API client would deliver:
//! the company financials plus optional assumptions, weights, backend
//! valuation detail, and a language code.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use fairval_core::types::{Assumptions, CompanyFinancials, ModelWeights, ValuationPayload};

/// One company's full export input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    /// Company financials snapshot.
    pub financials: CompanyFinancials,
    /// Valuation assumptions; service defaults when absent.
    #[serde(default)]
    pub assumptions: Assumptions,
    /// Model weights; equal weighting when absent.
    #[serde(default)]
    pub weights: ModelWeights,
    /// Backend-computed valuation detail, if the service sent any.
    #[serde(default)]
    pub valuation: Option<ValuationPayload>,
    /// Two-letter label language code.
    #[serde(default)]
    pub language: Option<String>,
}

/// Loads and parses a snapshot file.
pub fn load(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("cannot parse snapshot {}", path.display()))
}
