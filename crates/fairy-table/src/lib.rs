//! Tab-delimited sheet loading
//!
//! This crate handles:
//! - Reading `samples.tsv` / `files.tsv` style sheets into string tables
//! - Computing input provenance (content hash, dimensions, header)

pub mod table;
pub mod loader;

pub use table::{Table, Row};
pub use loader::{load_table, parse_table, sha256_hex, LoadedTable, TableError};
