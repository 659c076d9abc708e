//! `fairval value` - derive fair values and print the summary.

use anyhow::Result;

use fairval_models::derive_report;

use crate::cli::{OutputFormat, ValueArgs};
use crate::output;
use crate::snapshot;

pub fn execute(args: ValueArgs, format: OutputFormat) -> Result<()> {
    let snapshot = snapshot::load(&args.input)?;
    let report = derive_report(
        &snapshot.financials,
        &snapshot.assumptions,
        &snapshot.weights,
        snapshot.valuation.as_ref(),
    );

    match format {
        OutputFormat::Table => output::print_summary(&report, &snapshot.financials),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
