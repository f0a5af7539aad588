//! Report-level findings
//!
//! IMPORTANT: the serialized shape of `Finding` is consumed by the JSON and
//! Markdown writers and by golden snapshots. Field names are stable.

use serde::{Deserialize, Serialize};
use crate::warning::{IssueSeverity, WarningItem, WarningKind};

/// Finding severity as shown to curators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindingSeverity {
    /// Must fix before submission
    Fail,

    /// Soft violation - does not block readiness
    Warn,
}

impl FindingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
        }
    }
}

impl From<IssueSeverity> for FindingSeverity {
    fn from(severity: IssueSeverity) -> Self {
        match severity {
            IssueSeverity::Error => Self::Fail,
            IssueSeverity::Warning => Self::Warn,
        }
    }
}

impl std::fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The check-level detail carried by a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingDetails {
    pub kind: WarningKind,
    pub message: String,
    pub hint: String,
    pub row: Option<usize>,
    pub column: Option<String>,
}

impl From<WarningItem> for FindingDetails {
    fn from(item: WarningItem) -> Self {
        Self {
            kind: item.kind,
            message: item.message,
            hint: item.hint,
            row: item.row,
            column: item.column,
        }
    }
}

/// A single reported rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable code of the owning rule
    pub code: String,

    /// FAIL or WARN
    pub severity: FindingSeverity,

    /// Row/column description, or the rule's static location
    #[serde(rename = "where")]
    pub location: String,

    /// Rationale copied from the rule
    pub why: String,

    /// Remediation copied from the rule
    pub how_to_fix: String,

    /// Check-level detail
    pub details: FindingDetails,
}

impl Finding {
    pub fn is_fail(&self) -> bool {
        self.severity == FindingSeverity::Fail
    }
}
