//! Preflight entry points

use crate::attestation::{build_report, RunContext};
use crate::dispatch::{dispatch, SkippedRule};
use crate::mapper::map_finding;
use chrono::{DateTime, Utc};
use fairy_core::{Inputs, Report, Rulepack, RulepackError};
use fairy_table::{load_table, LoadedTable, TableError};
use std::path::Path;

/// Fatal run errors. Nothing here ever yields a partial report.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Input sheet missing, unreadable or malformed
    #[error(transparent)]
    Input(#[from] TableError),

    /// Rulepack missing, malformed or structurally invalid
    #[error(transparent)]
    Config(#[from] RulepackError),
}

/// Report plus the rules that were skipped while producing it
#[derive(Debug, Clone)]
pub struct Preflight {
    pub report: Report,
    pub skipped: Vec<SkippedRule>,
}

/// Evaluate a rulepack against already-loaded sheets
///
/// Pure: the same inputs and `run_at` always produce the same report.
pub fn evaluate(
    rulepack: &Rulepack,
    samples: &LoadedTable,
    files: &LoadedTable,
    fairy_version: &str,
    run_at: DateTime<Utc>,
) -> Preflight {
    let dispatched = dispatch(rulepack, &samples.table, &files.table);

    let findings = dispatched
        .outcomes
        .into_iter()
        .flat_map(|outcome| {
            let rule = outcome.rule;
            outcome.items.into_iter().map(move |item| map_finding(rule, item))
        })
        .collect();

    let context = RunContext {
        rulepack_id: rulepack.rulepack_id.clone(),
        rulepack_version: rulepack.rulepack_version.clone(),
        fairy_version: fairy_version.to_string(),
        run_at,
        inputs: Inputs {
            samples: samples.provenance.clone(),
            files: files.provenance.clone(),
        },
    };

    Preflight {
        report: build_report(findings, context),
        skipped: dispatched.skipped,
    }
}

/// Load the rulepack and both sheets, then evaluate
///
/// The rulepack is loaded first so a bad configuration is reported before
/// any input is read.
pub fn run_rulepack(
    rulepack_path: &Path,
    samples_path: &Path,
    files_path: &Path,
    fairy_version: &str,
) -> Result<Preflight, EngineError> {
    let rulepack = Rulepack::from_file(rulepack_path)?;
    tracing::debug!(
        rulepack = %rulepack.label(),
        rules = rulepack.rules.len(),
        "loaded rulepack"
    );

    let samples = load_table(samples_path)?;
    let files = load_table(files_path)?;

    let preflight = evaluate(&rulepack, &samples, &files, fairy_version, Utc::now());

    let attestation = &preflight.report.attestation;
    tracing::info!(
        rulepack = %rulepack.label(),
        fail = attestation.fail_count,
        warn = attestation.warn_count,
        submission_ready = attestation.submission_ready,
        "preflight complete"
    );

    Ok(preflight)
}
