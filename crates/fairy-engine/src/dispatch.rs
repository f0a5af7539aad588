//! Rule dispatcher
//!
//! Walks a rulepack in declaration order and routes each rule to its check.
//! Every rule runs; a failing rule never stops the ones after it.

use crate::checks;
use fairy_core::{CheckSpec, Rule, Rulepack, WarningItem};
use fairy_table::Table;

/// Items produced by one rule
#[derive(Debug)]
pub struct RuleOutcome<'r> {
    pub rule: &'r Rule,
    pub items: Vec<WarningItem>,
}

/// A rule whose check type this engine does not implement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub code: String,
    pub check_type: String,
}

/// Result of dispatching a whole rulepack
#[derive(Debug)]
pub struct Dispatch<'r> {
    /// One entry per rule, in rulepack order
    pub outcomes: Vec<RuleOutcome<'r>>,

    /// Rules that yielded nothing because their type is unknown
    pub skipped: Vec<SkippedRule>,
}

/// Run every rule of `rulepack` against the two sheets
pub fn dispatch<'r>(rulepack: &'r Rulepack, samples: &Table, files: &Table) -> Dispatch<'r> {
    let mut outcomes = Vec::with_capacity(rulepack.rules.len());
    let mut skipped = Vec::new();

    for rule in &rulepack.rules {
        if !rule.check.is_known() {
            tracing::warn!(
                code = %rule.code,
                check_type = %rule.check.type_name(),
                "skipping rule with unsupported check type"
            );
            skipped.push(SkippedRule {
                code: rule.code.clone(),
                check_type: rule.check.type_name().to_string(),
            });
        }

        let items = run_check(&rule.check, samples, files);
        tracing::debug!(
            code = %rule.code,
            check_type = %rule.check.type_name(),
            items = items.len(),
            "rule evaluated"
        );

        outcomes.push(RuleOutcome { rule, items });
    }

    Dispatch { outcomes, skipped }
}

/// Evaluate a single check
///
/// Column-level checks read the samples sheet, file-level checks read the
/// files sheet. Unknown kinds produce no items.
pub fn run_check(check: &CheckSpec, samples: &Table, files: &Table) -> Vec<WarningItem> {
    match check {
        CheckSpec::RequireColumns(p) => checks::require_columns(samples, &p.required_columns),
        CheckSpec::AtLeastOneNonEmptyPerRow(p) => p
            .column_groups
            .iter()
            .flat_map(|group| checks::at_least_one_nonempty_per_row(samples, group))
            .collect(),
        CheckSpec::IdCrosscheck(p) => checks::id_crosscheck(samples, files, &p.left_key, p.right_key()),
        CheckSpec::PairedEndComplete(p) => checks::paired_end_complete(files, p),
        CheckSpec::DatesAreIso8601(p) => checks::dates_are_iso8601(samples, &p.columns),
        CheckSpec::ProcessedDataPresent(p) => checks::processed_data_present(files, p),
        CheckSpec::Unknown { .. } => Vec::new(),
    }
}
