//! Raw check output
//!
//! A `WarningItem` is what a single check function emits before any rule
//! metadata is attached. Items are rule-agnostic: the same missing-column
//! item can belong to any rule that runs `require_columns`.

use serde::{Deserialize, Serialize};

/// Internal severity reported by a check
///
/// Only `Error` blocks submission readiness once mapped to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Soft violation - likely curator feedback
    Warning,

    /// Hard violation - must be fixed before submission
    Error,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine-readable sub-category of a warning item
///
/// These strings are STABLE. Do not rename - only add new kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A required column is absent from the sheet header
    MissingColumn,

    /// Every column of a "at least one of" group is empty for a row
    MissingBioContext,

    /// A key column needed for cross-referencing is absent
    MissingKeyColumn,

    /// A sample is not referenced by any file
    UnmatchedSample,

    /// A paired-end sample lacks its R1 or R2 file
    PairedEndIncomplete,

    /// A date value is not ISO-8601
    InvalidDate,

    /// A sample has raw reads but no processed data file
    MissingProcessedData,
}

impl WarningKind {
    /// Get the kind as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingColumn => "missing_column",
            Self::MissingBioContext => "missing_bio_context",
            Self::MissingKeyColumn => "missing_key_column",
            Self::UnmatchedSample => "unmatched_sample",
            Self::PairedEndIncomplete => "paired_end_incomplete",
            Self::InvalidDate => "invalid_date",
            Self::MissingProcessedData => "missing_processed_data",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single issue emitted by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningItem {
    /// Sub-category
    pub kind: WarningKind,

    /// Internal severity
    pub severity: IssueSeverity,

    /// Human-readable message
    pub message: String,

    /// Short remediation hint
    pub hint: String,

    /// Zero-based data row index, if the issue is row-scoped
    pub row: Option<usize>,

    /// Column name, if the issue is column-scoped
    pub column: Option<String>,
}

impl WarningItem {
    /// Create a new item that is neither row- nor column-scoped
    pub fn new(
        kind: WarningKind,
        severity: IssueSeverity,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            hint: hint.into(),
            row: None,
            column: None,
        }
    }

    /// Shorthand for an `error` item
    pub fn error(kind: WarningKind, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(kind, IssueSeverity::Error, message, hint)
    }

    /// Shorthand for a `warning` item
    pub fn warning(kind: WarningKind, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::new(kind, IssueSeverity::Warning, message, hint)
    }

    /// Scope the item to a data row
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Scope the item to a column
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_stability() {
        assert_eq!(WarningKind::MissingColumn.as_str(), "missing_column");
        assert_eq!(WarningKind::UnmatchedSample.as_str(), "unmatched_sample");
        assert_eq!(WarningKind::InvalidDate.as_str(), "invalid_date");
    }

    #[test]
    fn item_serialization() {
        let item = WarningItem::error(WarningKind::MissingColumn, "Column 'tissue' is missing", "Add it")
            .in_column("tissue");

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"missing_column\""));
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"row\":null"));
    }

    #[test]
    fn builder_scoping() {
        let item = WarningItem::warning(WarningKind::MissingProcessedData, "m", "h").at_row(3);
        assert_eq!(item.row, Some(3));
        assert_eq!(item.column, None);
        assert_eq!(item.severity, IssueSeverity::Warning);
    }
}
