//! Sheet loading and provenance
//!
//! The file is read once. The raw bytes are hashed for provenance and then
//! parsed as tab-delimited text with a header row. No type coercion happens:
//! every cell stays a string.

use fairy_core::InputProvenance;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::table::Table;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A parsed sheet together with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub table: Table,
    pub provenance: InputProvenance,
}

/// Load a tab-delimited sheet from disk
///
/// An empty file yields an empty header and no rows.
pub fn load_table(path: &Path) -> Result<LoadedTable, TableError> {
    let display = path.display().to_string();

    let bytes = std::fs::read(path)
        .map_err(|e| TableError::IoError(display.clone(), e.to_string()))?;

    let table = parse_table(&bytes)
        .map_err(|e| TableError::FormatError(display.clone(), e.to_string()))?;

    let provenance = InputProvenance {
        path: display,
        sha256: sha256_hex(&bytes),
        n_rows: table.len(),
        n_cols: table.header().len(),
        header: table.header().to_vec(),
    };

    tracing::debug!(
        path = %provenance.path,
        rows = provenance.n_rows,
        cols = provenance.n_cols,
        "loaded sheet"
    );

    Ok(LoadedTable { table, provenance })
}

/// Parse tab-delimited bytes into a table
pub fn parse_table(bytes: &[u8]) -> Result<Table, csv::Error> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(header, rows))
}

/// Hex-encoded SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Sheet loading error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Failed to read input file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse {0} as tab-delimited text: {1}")]
    FormatError(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = parse_table(b"sample_id\ttissue\nS1\tliver\nS2\t\n").unwrap();

        assert_eq!(table.header(), &["sample_id".to_string(), "tissue".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).unwrap().get("tissue"), "");
    }

    #[test]
    fn empty_input_is_empty_table() {
        let table = parse_table(b"").unwrap();
        assert!(table.header().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn header_only() {
        let table = parse_table(b"sample_id\ttissue\n").unwrap();
        assert_eq!(table.header().len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let table = parse_table(b"a\tb\tc\r\n1\r\n1\t2\t3\t4\r\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).unwrap().get("b"), "");
        assert_eq!(table.row(1).unwrap().get("c"), "3");
    }

    #[test]
    fn bom_is_stripped() {
        let table = parse_table(b"\xEF\xBB\xBFsample_id\nS1\n").unwrap();
        assert!(table.has_column("sample_id"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert!(parse_table(b"sample_id\n\xFF\xFE\n").is_err());
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
