//! Integration tests for loading sheets from disk

use fairy_table::{load_table, TableError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_sheet(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn provenance_describes_the_sheet() {
    let file = write_sheet(b"sample_id\ttissue\tcollection_date\nS1\tliver\t2024-01-02\nS2\tbrain\t2024-01-03\n");

    let loaded = load_table(file.path()).unwrap();
    let prov = &loaded.provenance;

    assert_eq!(prov.path, file.path().display().to_string());
    assert_eq!(prov.n_rows, 2);
    assert_eq!(prov.n_cols, 3);
    assert_eq!(prov.header, vec!["sample_id", "tissue", "collection_date"]);
    assert_eq!(prov.sha256.len(), 64);
    assert_eq!(loaded.table.row(1).unwrap().get("tissue"), "brain");
}

#[test]
fn hash_is_stable_across_loads() {
    let file = write_sheet(b"sample_id\nS1\n");

    let first = load_table(file.path()).unwrap();
    let second = load_table(file.path()).unwrap();

    assert_eq!(first.provenance.sha256, second.provenance.sha256);
}

#[test]
fn one_byte_changes_the_hash() {
    let a = write_sheet(b"sample_id\nS1\n");
    let b = write_sheet(b"sample_id\nS2\n");

    let a = load_table(a.path()).unwrap();
    let b = load_table(b.path()).unwrap();

    assert_ne!(a.provenance.sha256, b.provenance.sha256);
}

#[test]
fn empty_file_has_no_header() {
    let file = write_sheet(b"");
    let loaded = load_table(file.path()).unwrap();

    assert_eq!(loaded.provenance.n_rows, 0);
    assert_eq!(loaded.provenance.n_cols, 0);
    assert!(loaded.provenance.header.is_empty());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(&dir.path().join("nope.tsv")).unwrap_err();

    assert!(matches!(err, TableError::IoError(..)));
}

#[test]
fn undecodable_file_is_format_error() {
    let file = write_sheet(b"sample_id\n\xC3\x28\n");
    let err = load_table(file.path()).unwrap_err();

    assert!(matches!(err, TableError::FormatError(..)));
}
