//! Check library
//!
//! Each check is a pure function over one or two tables returning the
//! warning items it found. Checks never fail: a malformed row is reported as
//! an item and evaluation continues.

pub mod columns;
pub mod crosscheck;
pub mod paired_end;
pub mod dates;
pub mod processed;

pub use columns::{at_least_one_nonempty_per_row, require_columns};
pub use crosscheck::id_crosscheck;
pub use paired_end::paired_end_complete;
pub use dates::{dates_are_iso8601, is_iso8601};
pub use processed::processed_data_present;

use fairy_table::{Row, Table};
use std::collections::HashMap;

/// File rows belonging to one sample
#[derive(Debug)]
pub(crate) struct SampleFiles<'a> {
    pub id: &'a str,
    pub rows: Vec<Row<'a>>,
}

impl<'a> SampleFiles<'a> {
    /// Index of the sample's first file row
    pub fn first_row(&self) -> usize {
        self.rows.first().map(|r| r.index()).unwrap_or(0)
    }

    pub fn any_file(&self, file_column: &str, pred: impl Fn(&str) -> bool) -> bool {
        self.rows.iter().any(|r| pred(r.get(file_column).trim()))
    }
}

/// Group file rows by sample identifier, in order of first appearance
///
/// Rows with a blank identifier belong to no sample and are skipped.
pub(crate) fn group_by_sample<'a>(files: &'a Table, key: &str) -> Vec<SampleFiles<'a>> {
    let mut groups: Vec<SampleFiles<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for row in files.rows() {
        let id = row.get(key).trim();
        if id.is_empty() {
            continue;
        }

        match positions.get(id) {
            Some(&pos) => groups[pos].rows.push(row),
            None => {
                positions.insert(id, groups.len());
                groups.push(SampleFiles { id, rows: vec![row] });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_sample_keeps_first_appearance_order() {
        let files = Table::from_rows(
            &["sample_id", "filename"],
            &[&["S2", "a"], &["S1", "b"], &["", "c"], &["S2", "d"]],
        );

        let groups = group_by_sample(&files, "sample_id");
        let summary: Vec<_> = groups
            .iter()
            .map(|g| (g.id, g.rows.iter().map(|r| r.index()).collect::<Vec<_>>()))
            .collect();

        assert_eq!(summary, vec![("S2", vec![0, 3]), ("S1", vec![1])]);
        assert_eq!(groups[0].first_row(), 0);
    }
}
