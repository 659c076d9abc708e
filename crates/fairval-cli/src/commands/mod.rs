//! Subcommand implementations.

pub mod export;
pub mod value;
