//! Fairval CLI - equity valuation and report exports from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Derive fair values from a snapshot
//! fairval value --input VNM.json
//!
//! # Full workbook bundle, with original spreadsheets looked up locally
//! fairval export --input VNM.json --artifact complete --source-dir ./sheets
//!
//! # Text report into a target directory
//! fairval export --input VNM.json --artifact text --out ./reports
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod snapshot;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Value(args) => commands::value::execute(args, format)?,
        Commands::Export(args) => commands::export::execute(args, format)?,
    }

    Ok(())
}
