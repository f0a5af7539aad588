//! Row-oriented string table

use std::collections::HashMap;

/// An in-memory sheet
///
/// Every value is a string. Cells missing from short rows read as `""`, as
/// do lookups of columns absent from the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    header: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a header and rows
    ///
    /// Rows are padded with empty strings to the header width. Cells past the
    /// header width are dropped. If a column name repeats, lookups resolve to
    /// its first occurrence.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(header.len());
        for (i, name) in header.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        let width = header.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { header, index, rows }
    }

    /// Convenience constructor from string slices (used heavily in tests)
    pub fn from_rows(header: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    /// Column names in source order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by zero-based data index
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then(|| Row { table: self, index })
    }

    /// Iterate rows in source order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }
}

/// A borrowed view of one data row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Zero-based data row index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of `column`, or `""` when the column is absent
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .index
            .get(column)
            .map(|&i| self.table.rows[self.index][i].as_str())
            .unwrap_or("")
    }

    /// True when the value of `column` is empty or whitespace
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).trim().is_empty()
    }
}
