//! Column presence checks

use fairy_core::{WarningItem, WarningKind};
use fairy_table::Table;

/// One error per required column absent from the header
pub fn require_columns(table: &Table, required_columns: &[String]) -> Vec<WarningItem> {
    required_columns
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| {
            WarningItem::error(
                WarningKind::MissingColumn,
                format!("Required column '{}' is missing", name),
                format!("Add a '{}' column to the sheet header", name),
            )
            .in_column(name.as_str())
        })
        .collect()
}

/// One error per row where every column of `column_group` is empty
///
/// Columns absent from the header count as empty. The item is scoped to the
/// row only, since no single column is at fault.
pub fn at_least_one_nonempty_per_row(table: &Table, column_group: &[String]) -> Vec<WarningItem> {
    if column_group.is_empty() {
        return Vec::new();
    }

    let group = column_group.join(", ");

    table
        .rows()
        .filter(|row| column_group.iter().all(|col| row.is_blank(col)))
        .map(|row| {
            WarningItem::error(
                WarningKind::MissingBioContext,
                format!("Row {} has no value in any of: {}", row.index(), group),
                format!("Fill in at least one of: {}", group),
            )
            .at_row(row.index())
        })
        .collect()
}
