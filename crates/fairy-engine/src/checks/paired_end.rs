//! Paired-end read completeness

use fairy_core::{PairedEndParams, WarningItem, WarningKind};
use fairy_table::Table;

use super::group_by_sample;

/// Paired-end samples must have both an R1 and an R2 file
///
/// A sample is paired when any of its file rows carries the paired layout
/// value (compared case-insensitively). One error per incomplete sample,
/// scoped to its first file row.
pub fn paired_end_complete(files: &Table, params: &PairedEndParams) -> Vec<WarningItem> {
    let mut items = Vec::new();

    for sample in group_by_sample(files, &params.samples_key) {
        let paired = sample.rows.iter().any(|row| {
            row.get(&params.layout_column)
                .trim()
                .eq_ignore_ascii_case(params.paired_value.trim())
        });
        if !paired {
            continue;
        }

        let has_r1 = sample.any_file(&params.file_column, |f| params.r1_pattern.is_match(f));
        let has_r2 = sample.any_file(&params.file_column, |f| params.r2_pattern.is_match(f));

        let missing = match (has_r1, has_r2) {
            (true, true) => continue,
            (false, true) => "R1 file",
            (true, false) => "R2 file",
            (false, false) => "R1 and R2 files",
        };

        items.push(
            WarningItem::error(
                WarningKind::PairedEndIncomplete,
                format!("Paired-end sample '{}' is missing its {}", sample.id, missing),
                format!(
                    "Add the {} (matching '{}' / '{}') or change the layout",
                    missing,
                    params.r1_pattern.as_str(),
                    params.r2_pattern.as_str()
                ),
            )
            .at_row(sample.first_row())
            .in_column(params.file_column.as_str()),
        );
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(rows: &[&[&str]]) -> Table {
        Table::from_rows(&["sample_id", "filename", "layout"], rows)
    }

    #[test]
    fn test_complete_pair_passes() {
        let table = files(&[
            &["S1", "S1_R1.fastq.gz", "PAIRED"],
            &["S1", "S1_R2.fastq.gz", "PAIRED"],
        ]);

        assert!(paired_end_complete(&table, &PairedEndParams::default()).is_empty());
    }

    #[test]
    fn test_missing_mate_reported_at_first_row() {
        let table = files(&[
            &["S1", "S1_R1.fastq.gz", "PAIRED"],
            &["S1", "S1_R2.fastq.gz", "PAIRED"],
            &["S2", "S2_R1.fastq.gz", "paired"],
            &["S2", "S2.counts.tsv", "paired"],
        ]);

        let items = paired_end_complete(&table, &PairedEndParams::default());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, WarningKind::PairedEndIncomplete);
        assert_eq!(items[0].row, Some(2));
        assert_eq!(items[0].column.as_deref(), Some("filename"));
        assert!(items[0].message.contains("R2 file"));
    }

    #[test]
    fn test_single_end_is_not_checked() {
        let table = files(&[&["S3", "S3.fastq.gz", "SINGLE"]]);
        assert!(paired_end_complete(&table, &PairedEndParams::default()).is_empty());
    }

    #[test]
    fn test_both_mates_missing() {
        let table = files(&[&["S4", "S4.bam", "PAIRED"]]);
        let items = paired_end_complete(&table, &PairedEndParams::default());

        assert_eq!(items.len(), 1);
        assert!(items[0].message.contains("R1 and R2 files"));
    }

    #[test]
    fn test_custom_patterns() {
        let params: PairedEndParams = serde_json::from_str(
            r#"{"r1_pattern": "_1\\.fq", "r2_pattern": "_2\\.fq", "layout_value_for_paired": "PE"}"#,
        )
        .unwrap();

        let table = files(&[
            &["S5", "S5_1.fq.gz", "PE"],
            &["S5", "S5_2.fq.gz", "PE"],
            &["S6", "S6_1.fq.gz", "PE"],
        ]);

        let items = paired_end_complete(&table, &params);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].row, Some(2));
    }
}
