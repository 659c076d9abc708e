//! Zip archive assembly for the complete-report bundle.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportResult;

/// Packs named entries into a single zip archive.
pub(crate) fn zip_bundle(entries: &[(String, Vec<u8>)]) -> ExportResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_bundle_round_trips() {
        let entries = vec![
            ("report.xlsx".to_string(), b"workbook bytes".to_vec()),
            ("VNM_Financials.xlsx".to_string(), b"original".to_vec()),
        ];
        let bytes = zip_bundle(&entries).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("report.xlsx")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "workbook bytes");
    }
}
