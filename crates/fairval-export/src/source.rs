//! Boundary to the data service's original source spreadsheet.
//!
//! The real HTTP client is an external collaborator; the orchestrator only
//! needs a HEAD-style availability probe and a byte fetch. Retrieval
//! failures are non-fatal by policy: the caller proceeds without the
//! spreadsheet and reports partial success.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a spreadsheet source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no spreadsheet for the symbol.
    #[error("source spreadsheet unavailable: {0}")]
    Unavailable(String),

    /// Transport or filesystem failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Provider of the original source spreadsheet.
pub trait SpreadsheetSource: Send + Sync {
    /// Availability check; must not transfer the payload.
    fn probe(&self, symbol: &str) -> Result<bool, SourceError>;

    /// Fetches the spreadsheet bytes.
    fn fetch(&self, symbol: &str) -> Result<Vec<u8>, SourceError>;
}

/// A source with no spreadsheets; exports proceed without the original.
#[derive(Debug, Default)]
pub struct NoSource;

impl SpreadsheetSource for NoSource {
    fn probe(&self, _symbol: &str) -> Result<bool, SourceError> {
        Ok(false)
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::Unavailable(symbol.to_string()))
    }
}

/// Directory-backed source looking for `{SYMBOL}.xlsx`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{}.xlsx", symbol.to_ascii_uppercase()))
    }
}

impl SpreadsheetSource for DirectorySource {
    fn probe(&self, symbol: &str) -> Result<bool, SourceError> {
        Ok(self.path_for(symbol).is_file())
    }

    fn fetch(&self, symbol: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(SourceError::Unavailable(symbol.to_string()));
        }
        Ok(std::fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_source_probes_false() {
        assert!(!NoSource.probe("VNM").unwrap());
        assert!(NoSource.fetch("VNM").is_err());
    }

    #[test]
    fn test_directory_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("VNM.xlsx"), b"stub").unwrap();
        let source = DirectorySource::new(dir.path());

        assert!(source.probe("vnm").unwrap());
        assert_eq!(source.fetch("vnm").unwrap(), b"stub");
        assert!(!source.probe("FPT").unwrap());
    }
}
