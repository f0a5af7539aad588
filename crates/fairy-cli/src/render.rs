//! Console and Markdown rendering of a preflight report

use colored::Colorize;
use fairy_core::{FindingSeverity, InputProvenance, Report};
use fairy_engine::SkippedRule;
use std::path::Path;

use crate::history::Resolution;

/// Print a human-readable summary of the report to stdout
pub fn print_preflight_summary(
    report: &Report,
    report_path: &Path,
    resolution: &Resolution,
    skipped: &[SkippedRule],
) {
    let att = &report.attestation;
    let fail_codes = report.codes_with_severity(FindingSeverity::Fail);
    let warn_codes = report.codes_with_severity(FindingSeverity::Warn);

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "FAIRy Preflight".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Rulepack:         {}@{}", att.rulepack_id, att.rulepack_version);
    println!("FAIRy version:    {}", att.fairy_version);
    println!("Run at (UTC):     {}", att.run_at_utc);

    let fail_count = if att.fail_count > 0 {
        att.fail_count.to_string().red().bold()
    } else {
        att.fail_count.to_string().green()
    };
    let warn_count = if att.warn_count > 0 {
        att.warn_count.to_string().yellow()
    } else {
        att.warn_count.to_string().green()
    };
    println!("FAIL findings:    {} {}", fail_count, code_list(&fail_codes));
    println!("WARN findings:    {} {}", warn_count, code_list(&warn_codes));

    let ready = if att.submission_ready {
        "true".green().bold()
    } else {
        "false".red().bold()
    };
    println!("submission_ready: {}", ready);
    println!("Report JSON:      {}", report_path.display());
    println!();

    println!("{}", "Input provenance:".bold());
    print_provenance("samples.tsv", &att.inputs.samples);
    print_provenance("files.tsv", &att.inputs.files);
    println!();

    if let Some(first) = report.findings.first() {
        let severity = match first.severity {
            FindingSeverity::Fail => "FAIL".red().bold(),
            FindingSeverity::Warn => "WARN".yellow().bold(),
        };
        println!("{}", "Example finding:".bold());
        println!("  [{}] {} @ {}", severity, first.code, first.location);
        println!("    why: {}", first.why);
        println!("    fix: {}", first.how_to_fix);
        println!();
    }

    println!("{}", "Resolved since last run:".bold());
    match resolution {
        Resolution::Disabled => println!("  (tracking disabled)"),
        Resolution::NoBaseline => println!("  (no baseline from prior run)"),
        Resolution::Resolved(codes) if codes.is_empty() => {
            println!("  (no previously-reported issues resolved)")
        }
        Resolution::Resolved(codes) => {
            for code in codes {
                println!("  {} {}", "✔".green(), code);
            }
        }
    }
    println!();

    if !skipped.is_empty() {
        println!("{}", "Skipped rules (check type not supported):".yellow());
        for rule in skipped {
            println!("  {} ({})", rule.code, rule.check_type);
        }
        println!();
    }
}

fn print_provenance(label: &str, input: &InputProvenance) {
    println!("{} sha256: {}", label, input.sha256);
    println!("  path: {}", input.path);
    println!("  rows:{} cols:{}", input.n_rows, input.n_cols);
}

fn code_list(codes: &[String]) -> String {
    format!("[{}]", codes.join(", "))
}

/// Curator-facing Markdown one-pager
pub fn generate_markdown_report(report: &Report, resolution: &Resolution) -> String {
    let att = &report.attestation;
    let fail_codes = report.codes_with_severity(FindingSeverity::Fail);
    let warn_codes = report.codes_with_severity(FindingSeverity::Warn);

    let mut md = String::new();

    md.push_str("# FAIRy Preflight Report\n\n");
    md.push_str(&format!("- **Rulepack:** {}@{}\n", att.rulepack_id, att.rulepack_version));
    md.push_str(&format!("- **FAIRy version:** {}\n", att.fairy_version));
    md.push_str(&format!("- **Run at (UTC):** {}\n", att.run_at_utc));
    md.push_str(&format!("- **submission_ready:** `{}`\n\n", att.submission_ready));

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- FAIL findings: {} {}\n", att.fail_count, code_list(&fail_codes)));
    md.push_str(&format!("- WARN findings: {} {}\n\n", att.warn_count, code_list(&warn_codes)));
    md.push_str("If `submission_ready` is `true`, FAIRy believes this dataset is ready to submit.\n\n");
    md.push_str("---\n\n");

    md.push_str("## Input provenance\n\n");
    md.push_str("These hashes and dimensions identify the exact files that FAIRy validated.\n\n");
    push_provenance(&mut md, "samples.tsv", &att.inputs.samples);
    push_provenance(&mut md, "files.tsv", &att.inputs.files);
    md.push_str("---\n\n");

    md.push_str("## Findings (all current issues)\n\n");
    md.push_str("Severity `FAIL` means \"must fix before submission.\"\n");
    md.push_str("Severity `WARN` means \"soft violation / likely curator feedback.\"\n\n");

    if report.findings.is_empty() {
        md.push_str("_No findings._\n\n");
    } else {
        md.push_str("| Severity | Code | Location | Why it matters | How to fix |\n");
        md.push_str("|----------|------|----------|----------------|------------|\n");
        for finding in &report.findings {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                finding.severity,
                escape_cell(&finding.code),
                escape_cell(&finding.location),
                escape_cell(&finding.why),
                escape_cell(&finding.how_to_fix),
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str("## Resolved since last run\n\n");
    match resolution {
        Resolution::Disabled => md.push_str("_Resolved-issue tracking is disabled._\n"),
        Resolution::NoBaseline => {
            md.push_str("_No baseline from prior run (first run or history missing)._\n")
        }
        Resolution::Resolved(codes) if codes.is_empty() => {
            md.push_str("_No previously-reported issues resolved._\n")
        }
        Resolution::Resolved(codes) => {
            for code in codes {
                md.push_str(&format!("- ✅ {}\n", code));
            }
        }
    }

    md
}

fn push_provenance(md: &mut String, label: &str, input: &InputProvenance) {
    md.push_str(&format!("### {}\n\n", label));
    md.push_str(&format!("- path: `{}`\n", input.path));
    md.push_str(&format!("- sha256: `{}`\n", input.sha256));
    md.push_str(&format!("- rows: {}\n", input.n_rows));
    md.push_str(&format!("- cols: {}\n\n", input.n_cols));
}

/// Table cells cannot contain raw pipes or newlines
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairy_core::{Attestation, Finding, FindingDetails, Inputs, WarningKind};
    use pretty_assertions::assert_eq;

    fn provenance(path: &str) -> InputProvenance {
        InputProvenance {
            path: path.to_string(),
            sha256: "ab".repeat(32),
            n_rows: 4,
            n_cols: 8,
            header: vec!["sample_id".to_string()],
        }
    }

    fn report(findings: Vec<Finding>) -> Report {
        let fail_count = findings.iter().filter(|f| f.is_fail()).count();
        Report {
            attestation: Attestation {
                rulepack_id: "GEO-SEQ-BULK".to_string(),
                rulepack_version: "0.1.0".to_string(),
                fairy_version: "0.2.0".to_string(),
                run_at_utc: "2024-03-01T12:00:00Z".to_string(),
                submission_ready: fail_count == 0,
                fail_count,
                warn_count: findings.len() - fail_count,
                inputs: Inputs {
                    samples: provenance("samples.tsv"),
                    files: provenance("files.tsv"),
                },
            },
            findings,
        }
    }

    fn finding(code: &str, severity: FindingSeverity, why: &str) -> Finding {
        Finding {
            code: code.to_string(),
            severity,
            location: "row 3, column 'sample_id'".to_string(),
            why: why.to_string(),
            how_to_fix: "Fix it".to_string(),
            details: FindingDetails {
                kind: WarningKind::UnmatchedSample,
                message: String::new(),
                hint: String::new(),
                row: Some(3),
                column: Some("sample_id".to_string()),
            },
        }
    }

    #[test]
    fn test_markdown_findings_table() {
        let report = report(vec![
            finding("CORE.ID.UNMATCHED_SAMPLE", FindingSeverity::Fail, "No files | unusable"),
            finding("GEO.FILES.PROCESSED_DATA_MISSING", FindingSeverity::Warn, "Curators ask"),
        ]);

        let md = generate_markdown_report(&report, &Resolution::NoBaseline);

        assert!(md.starts_with("# FAIRy Preflight Report\n"));
        assert!(md.contains("- **Rulepack:** GEO-SEQ-BULK@0.1.0\n"));
        assert!(md.contains("- **submission_ready:** `false`\n"));
        assert!(md.contains("- FAIL findings: 1 [CORE.ID.UNMATCHED_SAMPLE]\n"));
        assert!(md.contains("- WARN findings: 1 [GEO.FILES.PROCESSED_DATA_MISSING]\n"));
        assert!(md.contains(
            "| FAIL | CORE.ID.UNMATCHED_SAMPLE | row 3, column 'sample_id' | No files \\| unusable | Fix it |\n"
        ));
        assert!(md.contains("_No baseline from prior run"));
    }

    #[test]
    fn test_markdown_without_findings() {
        let md = generate_markdown_report(&report(Vec::new()), &Resolution::Resolved(Vec::new()));

        assert!(md.contains("_No findings._"));
        assert!(!md.contains("| Severity |"));
        assert!(md.contains("- **submission_ready:** `true`"));
        assert!(md.contains("_No previously-reported issues resolved._"));
    }

    #[test]
    fn test_markdown_resolved_codes() {
        let resolution = Resolution::Resolved(vec!["CORE.DATE.INVALID_ISO8601".to_string()]);
        let md = generate_markdown_report(&report(Vec::new()), &resolution);

        assert!(md.ends_with("## Resolved since last run\n\n- ✅ CORE.DATE.INVALID_ISO8601\n"));
    }

    #[test]
    fn test_markdown_provenance_block() {
        let md = generate_markdown_report(&report(Vec::new()), &Resolution::Disabled);

        let expected = format!(
            "### samples.tsv\n\n- path: `samples.tsv`\n- sha256: `{}`\n- rows: 4\n- cols: 8\n\n",
            "ab".repeat(32)
        );
        assert!(md.contains(&expected));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b c");
    }
}
