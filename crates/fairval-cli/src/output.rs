//! Terminal output formatting.

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use fairval_core::types::{CompanyFinancials, ValuationReport};
use fairval_report::format;

/// One row of the valuation summary table.
#[derive(Debug, Tabled)]
pub struct ModelRow {
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Fair Value")]
    pub fair_value: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[tabled(rename = "Upside")]
    pub upside: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Prints the valuation summary as a rounded table plus the blended result.
pub fn print_summary(report: &ValuationReport, financials: &CompanyFinancials) {
    let rows: Vec<ModelRow> = report
        .models
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => ModelRow {
                model: result.model.label().to_string(),
                fair_value: format::money(result.share_value),
                weight: format::number(outcome.weight, 0),
                upside: financials
                    .upside(result.share_value)
                    .map_or_else(|| "n/a".to_string(), format::signed_percent),
                source: match result.provenance {
                    fairval_core::types::Provenance::Backend => "backend".to_string(),
                    fairval_core::types::Provenance::Derived => "derived".to_string(),
                },
            },
            Err(err) => ModelRow {
                model: outcome.model.label().to_string(),
                fair_value: "N/A".to_string(),
                weight: format::number(outcome.weight, 0),
                upside: "n/a".to_string(),
                source: err.to_string(),
            },
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();
    println!("{table}");

    match &report.weighted_average {
        Ok(weighted) => {
            println!(
                "{}: {}",
                "Weighted Average".bold(),
                format::money(*weighted)
            );
        }
        Err(err) => print_warning(&format!("weighted average unavailable: {err}")),
    }
    if let Some(rating) = report.recommendation {
        println!("{}: {}", "Recommendation".bold(), rating.label());
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}
