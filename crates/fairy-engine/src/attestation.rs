//! Attestation builder
//!
//! The only place that decides submission readiness.

use chrono::{DateTime, SecondsFormat, Utc};
use fairy_core::{Attestation, Finding, FindingSeverity, Inputs, Report};

/// Everything about a run that is not a finding
#[derive(Debug, Clone)]
pub struct RunContext {
    pub rulepack_id: String,
    pub rulepack_version: String,
    pub fairy_version: String,
    pub run_at: DateTime<Utc>,
    pub inputs: Inputs,
}

/// Tally findings and stamp the run
pub fn build_attestation(findings: &[Finding], context: RunContext) -> Attestation {
    let fail_count = findings.iter().filter(|f| f.severity == FindingSeverity::Fail).count();
    let warn_count = findings.len() - fail_count;

    Attestation {
        rulepack_id: context.rulepack_id,
        rulepack_version: context.rulepack_version,
        fairy_version: context.fairy_version,
        run_at_utc: context.run_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        submission_ready: fail_count == 0,
        fail_count,
        warn_count,
        inputs: context.inputs,
    }
}

pub fn build_report(findings: Vec<Finding>, context: RunContext) -> Report {
    let attestation = build_attestation(&findings, context);
    Report { attestation, findings }
}
