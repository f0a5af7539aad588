//! Sample/file identifier cross-referencing

use fairy_core::{WarningItem, WarningKind};
use fairy_table::Table;
use std::collections::HashSet;

/// Samples not referenced by any file
///
/// Builds the set of identifiers in `files[right_key]` and reports every
/// samples row whose `samples[left_key]` is not in it. Only this direction
/// is checked; files pointing at unknown samples are not reported here.
///
/// If either sheet lacks its key column, one `missing_key_column` error is
/// emitted per sheet and no per-row matching happens.
pub fn id_crosscheck(samples: &Table, files: &Table, left_key: &str, right_key: &str) -> Vec<WarningItem> {
    let mut items = Vec::new();

    if !samples.has_column(left_key) {
        items.push(missing_key("samples", left_key));
    }
    if !files.has_column(right_key) {
        items.push(missing_key("files", right_key));
    }
    if !items.is_empty() {
        return items;
    }

    let referenced: HashSet<&str> = files
        .rows()
        .map(|row| row.get(right_key).trim())
        .filter(|id| !id.is_empty())
        .collect();

    for row in samples.rows() {
        let id = row.get(left_key).trim();
        if referenced.contains(id) {
            continue;
        }

        let message = if id.is_empty() {
            format!("Row {} has no sample identifier and cannot be matched to any file", row.index())
        } else {
            format!("Sample '{}' is not referenced by any file", id)
        };

        items.push(
            WarningItem::error(
                WarningKind::UnmatchedSample,
                message,
                format!("List this sample's files in the files sheet under '{}', or remove the sample", right_key),
            )
            .at_row(row.index())
            .in_column(left_key),
        );
    }

    items
}

fn missing_key(sheet: &str, key: &str) -> WarningItem {
    WarningItem::error(
        WarningKind::MissingKeyColumn,
        format!("The {} sheet has no '{}' column to cross-reference on", sheet, key),
        format!("Add a '{}' column to the {} sheet", key, sheet),
    )
    .in_column(key)
}
