//! Finding mapper

use fairy_core::{Finding, FindingSeverity, Rule, WarningItem};

/// Attach rule metadata to a check item
///
/// `code`, `why` and `how_to_fix` always come from the rule. The location
/// is derived from the item's row/column, falling back to the rule's `where`.
pub fn map_finding(rule: &Rule, item: WarningItem) -> Finding {
    let location = describe_location(&item, &rule.location);

    Finding {
        code: rule.code.clone(),
        severity: FindingSeverity::from(item.severity),
        location,
        why: rule.why.clone(),
        how_to_fix: rule.how_to_fix.clone(),
        details: item.into(),
    }
}

/// `row N`, `column 'c'`, both comma-joined, or `fallback`
pub fn describe_location(item: &WarningItem, fallback: &str) -> String {
    let mut parts = Vec::with_capacity(2);

    if let Some(row) = item.row {
        parts.push(format!("row {}", row));
    }
    if let Some(column) = &item.column {
        parts.push(format!("column '{}'", column));
    }

    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(", ")
    }
}
