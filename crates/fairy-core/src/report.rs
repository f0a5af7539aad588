//! Report schema
//!
//! `{attestation, findings}` is the sole output of a preflight run. The
//! serialization layer writes it verbatim: field names, types, and the order
//! of `findings` are part of the contract.

use serde::{Deserialize, Serialize};
use crate::finding::Finding;

/// Provenance for one input sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputProvenance {
    /// Path as given to the loader
    pub path: String,

    /// Hex-encoded SHA-256 of the raw file bytes
    pub sha256: String,

    /// Data rows, excluding the header
    pub n_rows: usize,

    /// Header width
    pub n_cols: usize,

    /// Header in source order
    pub header: Vec<String>,
}

/// Provenance of both inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    pub samples: InputProvenance,
    pub files: InputProvenance,
}

/// Aggregate verdict plus run and input provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub rulepack_id: String,
    pub rulepack_version: String,

    /// Engine version string, embedded verbatim
    pub fairy_version: String,

    /// Timestamp (RFC 3339, UTC)
    pub run_at_utc: String,

    /// True iff `fail_count == 0`
    pub submission_ready: bool,

    pub fail_count: usize,
    pub warn_count: usize,

    pub inputs: Inputs,
}

/// Preflight report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub attestation: Attestation,

    /// Rule order, then per-check emission order
    pub findings: Vec<Finding>,
}

impl Report {
    /// Check if the dataset is ready to submit
    pub fn is_submission_ready(&self) -> bool {
        self.attestation.submission_ready
    }

    /// Distinct codes of all findings with the given severity, sorted
    pub fn codes_with_severity(&self, severity: crate::FindingSeverity) -> Vec<String> {
        let codes: std::collections::BTreeSet<&str> = self
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.code.as_str())
            .collect();

        codes.into_iter().map(str::to_string).collect()
    }

    /// Distinct codes of all findings, sorted
    pub fn codes(&self) -> std::collections::BTreeSet<String> {
        self.findings.iter().map(|f| f.code.clone()).collect()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file, creating parent directories
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{FindingDetails, FindingSeverity};
    use crate::warning::WarningKind;

    fn provenance(path: &str) -> InputProvenance {
        InputProvenance {
            path: path.to_string(),
            sha256: "00".repeat(32),
            n_rows: 2,
            n_cols: 3,
            header: vec!["sample_id".to_string(), "tissue".to_string(), "collection_date".to_string()],
        }
    }

    fn finding(code: &str, severity: FindingSeverity) -> Finding {
        Finding {
            code: code.to_string(),
            severity,
            location: "samples.tsv".to_string(),
            why: String::new(),
            how_to_fix: String::new(),
            details: FindingDetails {
                kind: WarningKind::MissingColumn,
                message: String::new(),
                hint: String::new(),
                row: None,
                column: None,
            },
        }
    }

    fn report(findings: Vec<Finding>) -> Report {
        Report {
            attestation: Attestation {
                rulepack_id: "GEO-SEQ-BULK".to_string(),
                rulepack_version: "0.1.0".to_string(),
                fairy_version: "0.2.0".to_string(),
                run_at_utc: "2024-01-01T00:00:00+00:00".to_string(),
                submission_ready: false,
                fail_count: 2,
                warn_count: 1,
                inputs: Inputs {
                    samples: provenance("samples.tsv"),
                    files: provenance("files.tsv"),
                },
            },
            findings,
        }
    }

    #[test]
    fn codes_by_severity() {
        let report = report(vec![
            finding("B", FindingSeverity::Fail),
            finding("A", FindingSeverity::Fail),
            finding("B", FindingSeverity::Fail),
            finding("C", FindingSeverity::Warn),
        ]);

        assert_eq!(report.codes_with_severity(FindingSeverity::Fail), vec!["A", "B"]);
        assert_eq!(report.codes_with_severity(FindingSeverity::Warn), vec!["C"]);
        assert_eq!(report.codes().len(), 3);
    }

    #[test]
    fn report_serialization() {
        let report = report(vec![finding("A", FindingSeverity::Fail)]);
        let json = report.to_json().unwrap();

        assert!(json.contains("\"attestation\""));
        assert!(json.contains("\"submission_ready\": false"));
        assert!(json.contains("\"inputs\""));
        assert!(json.contains("\"where\""));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
