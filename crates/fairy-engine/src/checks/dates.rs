//! ISO-8601 date validation

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fairy_core::{WarningItem, WarningKind};
use fairy_table::Table;

/// One error per non-empty cell in `columns` that is not an ISO-8601 date
///
/// Items are emitted row by row, and within a row in the order of `columns`.
pub fn dates_are_iso8601(table: &Table, columns: &[String]) -> Vec<WarningItem> {
    let mut items = Vec::new();

    for row in table.rows() {
        for column in columns {
            let value = row.get(column).trim();
            if value.is_empty() || is_iso8601(value) {
                continue;
            }

            items.push(
                WarningItem::error(
                    WarningKind::InvalidDate,
                    format!("'{}' is not a valid ISO-8601 date", value),
                    "Use YYYY-MM-DD (e.g. 2024-03-15)",
                )
                .at_row(row.index())
                .in_column(column.as_str()),
            );
        }
    }

    items
}

/// Strict ISO-8601 check
///
/// Accepts a calendar date `YYYY-MM-DD`, or a date-time starting with one
/// (RFC 3339 with offset, or local `YYYY-MM-DDTHH:MM:SS[.fff]`). Month and
/// day must be two digits.
pub fn is_iso8601(value: &str) -> bool {
    let Some(date) = value.get(..10) else {
        return false;
    };
    if !has_date_shape(date) {
        return false;
    }

    if value.len() == 10 {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

fn has_date_shape(s: &str) -> bool {
    s.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    })
}
