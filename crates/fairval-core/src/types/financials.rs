//! Company financial snapshot consumed by the valuation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable per-company snapshot provided by the external data service.
///
/// The engine never mutates this; every derivation run consumes it read-only.
/// Fields the remote service could not populate arrive as `None` and are
/// surfaced downstream as missing (zero-defaulted) inputs rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyFinancials {
    /// Ticker symbol.
    pub symbol: String,
    /// Company display name.
    pub name: String,
    /// Sector classification, if known.
    #[serde(default)]
    pub sector: Option<String>,
    /// Listing exchange, if known.
    #[serde(default)]
    pub exchange: Option<String>,

    /// Last traded price per share.
    pub current_price: Decimal,
    /// Listed shares outstanding.
    pub shares_outstanding: Decimal,

    /// Trailing earnings per share.
    #[serde(default)]
    pub eps: Option<Decimal>,
    /// Book value per share.
    #[serde(default)]
    pub book_value_per_share: Option<Decimal>,
    /// Observed price/earnings multiple.
    #[serde(default)]
    pub pe_ratio: Option<Decimal>,
    /// Observed price/book multiple.
    #[serde(default)]
    pub pb_ratio: Option<Decimal>,

    /// Trailing-twelve-month revenue.
    #[serde(default)]
    pub revenue_ttm: Option<Decimal>,
    /// Trailing-twelve-month net income.
    #[serde(default)]
    pub net_income_ttm: Option<Decimal>,
    /// Trailing-twelve-month EBITDA.
    #[serde(default)]
    pub ebitda_ttm: Option<Decimal>,

    /// Return on equity, as a decimal fraction.
    #[serde(default)]
    pub roe: Option<Decimal>,
    /// Return on assets, as a decimal fraction.
    #[serde(default)]
    pub roa: Option<Decimal>,
    /// Total debt over shareholders' equity.
    #[serde(default)]
    pub debt_to_equity: Option<Decimal>,

    /// Raw statement line items, where the data service exposes them.
    #[serde(default)]
    pub line_items: LineItems,
}

/// Optional raw statement line items backing the cash-flow models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LineItems {
    /// Net profit for the period.
    #[serde(default)]
    pub net_income: Option<Decimal>,
    /// Depreciation and amortisation (non-cash charges).
    #[serde(default)]
    pub depreciation: Option<Decimal>,
    /// Proceeds less repayments of borrowings.
    #[serde(default)]
    pub net_borrowing: Option<Decimal>,
    /// Increase in working capital over the period.
    #[serde(default)]
    pub working_capital_change: Option<Decimal>,
    /// Fixed capital investment (outflow as a positive number).
    #[serde(default)]
    pub capex: Option<Decimal>,
    /// Interest expense for the period.
    #[serde(default)]
    pub interest_expense: Option<Decimal>,
    /// Short-term plus long-term borrowings.
    #[serde(default)]
    pub total_debt: Option<Decimal>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash: Option<Decimal>,
}

impl CompanyFinancials {
    /// Percentage deviation of `share_value` from the current market price.
    ///
    /// Returns `None` when the snapshot has no usable market price.
    #[must_use]
    pub fn upside(&self, share_value: Decimal) -> Option<Decimal> {
        if self.current_price <= Decimal::ZERO {
            return None;
        }
        Some((share_value - self.current_price) / self.current_price)
    }
}
