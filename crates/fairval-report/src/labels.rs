//! Fixed label translation table.
//!
//! Every user-facing label is resolved through this table before it is
//! written, so the three artifact formats agree on wording and only
//! renderable glyphs reach the PDF engine (the Vietnamese column is
//! accent-folded for that reason). Unknown keys fall back to the key itself,
//! which keeps a missing entry visible instead of panicking mid-render.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::context::Language;

/// `(key, english, vietnamese)` rows of the fixed table.
static TABLE: &[(&str, &str, &str)] = &[
    ("report_title", "Valuation Report", "Bao cao dinh gia"),
    ("generated", "Generated", "Ngay lap"),
    ("company_info", "Company Information", "Thong tin doanh nghiep"),
    ("symbol", "Symbol", "Ma co phieu"),
    ("company_name", "Company", "Ten doanh nghiep"),
    ("sector", "Sector", "Nganh"),
    ("exchange", "Exchange", "San giao dich"),
    ("market_data", "Market Data", "Du lieu thi truong"),
    ("current_price", "Current Price", "Gia hien tai"),
    ("shares_outstanding", "Shares Outstanding", "So luong co phieu luu hanh"),
    ("market_cap", "Market Capitalization", "Von hoa thi truong"),
    ("valuation_summary", "Valuation Summary", "Tong hop dinh gia"),
    ("model", "Model", "Mo hinh"),
    ("fair_value", "Fair Value", "Gia tri hop ly"),
    ("weight", "Weight", "Ty trong"),
    ("upside", "Upside", "Muc tang/giam"),
    ("source", "Source", "Nguon"),
    ("weighted_average", "Weighted Average", "Binh quan gia quyen"),
    ("recommendation", "Recommendation", "Khuyen nghi"),
    ("summary_stats", "Summary Statistics", "Thong ke tong hop"),
    ("average", "Average", "Trung binh"),
    ("minimum", "Minimum", "Thap nhat"),
    ("maximum", "Maximum", "Cao nhat"),
    ("models_used", "Models Used", "So mo hinh su dung"),
    ("inputs", "Inputs", "Du lieu dau vao"),
    ("net_income", "Net Income", "Loi nhuan rong"),
    ("depreciation", "Depreciation & Amortisation", "Khau hao"),
    ("net_borrowing", "Net Borrowing", "Vay rong"),
    ("interest_expense", "Interest Expense", "Chi phi lai vay"),
    ("working_capital_change", "Working Capital Investment", "Dau tu von luu dong"),
    ("capex", "Fixed Capital Investment", "Dau tu tai san co dinh"),
    ("total_debt", "Total Debt", "Tong no vay"),
    ("cash", "Cash & Equivalents", "Tien va tuong duong tien"),
    ("assumptions", "Assumptions", "Gia dinh"),
    ("revenue_growth", "Revenue Growth", "Tang truong doanh thu"),
    ("terminal_growth", "Terminal Growth", "Tang truong dai han"),
    ("wacc", "WACC", "WACC"),
    ("required_return", "Required Return", "Ty suat loi nhuan yeu cau"),
    ("tax_rate", "Tax Rate", "Thue suat"),
    ("projection_years", "Projection Years", "So nam du phong"),
    ("payout_ratio", "Payout Ratio", "Ty le chi tra co tuc"),
    ("discount_rate", "Discount Rate", "Ty suat chiet khau"),
    ("base_cash_flow", "Base Cash Flow", "Dong tien co so"),
    ("projections", "Cash Flow Projections", "Du phong dong tien"),
    ("year", "Year", "Nam"),
    ("projected_cash_flow", "Projected Cash Flow", "Dong tien du phong"),
    ("discount_factor", "Discount Factor", "He so chiet khau"),
    ("present_value", "Present Value", "Gia tri hien tai"),
    ("terminal_value", "Terminal Value", "Gia tri cuoi ky"),
    ("pv_terminal", "PV of Terminal Value", "Gia tri hien tai cua gia tri cuoi ky"),
    ("enterprise_value", "Enterprise Value", "Gia tri doanh nghiep"),
    ("equity_value", "Equity Value", "Gia tri von chu so huu"),
    ("value_per_share", "Fair Value per Share", "Gia tri hop ly moi co phieu"),
    ("justified_ratio", "Justified Multiple", "He so hop ly"),
    ("basis_value", "Per-share Basis", "Gia tri co so moi co phieu"),
    ("implied_growth", "Implied Growth", "Tang truong ham y"),
    ("financial_health", "Financial Health", "Suc khoe tai chinh"),
    ("revenue_ttm", "Revenue (TTM)", "Doanh thu (12 thang)"),
    ("net_income_ttm", "Net Income (TTM)", "Loi nhuan rong (12 thang)"),
    ("ebitda_ttm", "EBITDA (TTM)", "EBITDA (12 thang)"),
    ("eps", "EPS", "EPS"),
    ("book_value_per_share", "Book Value per Share", "Gia tri so sach moi co phieu"),
    ("pe_ratio", "P/E", "P/E"),
    ("pb_ratio", "P/B", "P/B"),
    ("roe", "ROE", "ROE"),
    ("roa", "ROA", "ROA"),
    ("debt_to_equity", "Debt / Equity", "No / Von chu so huu"),
    ("sensitivity", "Sensitivity Analysis (FCFF)", "Phan tich do nhay (FCFF)"),
    ("wacc_by_growth", "WACC \\ Terminal Growth", "WACC \\ Tang truong dai han"),
    ("not_available", "N/A", "N/A"),
    ("formula", "Formula", "Cong thuc"),
    ("page", "Page", "Trang"),
];

static INDEX: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    TABLE
        .iter()
        .map(|&(key, en, vi)| (key, (en, vi)))
        .collect()
});

/// Resolves a label key for the requested language.
#[must_use]
pub fn text(key: &str, language: Language) -> &str {
    match INDEX.get(key) {
        Some(&(en, vi)) => match language {
            Language::En => en,
            Language::Vi => vi,
        },
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_resolves_per_language() {
        assert_eq!(text("fair_value", Language::En), "Fair Value");
        assert_eq!(text("fair_value", Language::Vi), "Gia tri hop ly");
    }

    #[test]
    fn test_unknown_key_falls_back_to_itself() {
        assert_eq!(text("no_such_key", Language::En), "no_such_key");
    }

    #[test]
    fn test_table_is_renderable_ascii() {
        // The PDF engine only carries built-in Latin fonts; the table must
        // never hand it a glyph outside ASCII.
        for (key, en, vi) in TABLE {
            assert!(key.is_ascii() && en.is_ascii() && vi.is_ascii());
        }
    }
}
