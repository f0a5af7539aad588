//! Processed data presence

use fairy_core::{ProcessedDataParams, WarningItem, WarningKind};
use fairy_table::Table;

use super::group_by_sample;

/// Samples with raw reads should also ship processed data
///
/// For each sample with at least one file matching the raw selector, require
/// one file matching any processed selector. Soft violation: emitted as a
/// `warning`, scoped to the sample's first file row.
pub fn processed_data_present(files: &Table, params: &ProcessedDataParams) -> Vec<WarningItem> {
    let mut items = Vec::new();
    let candidates: Vec<&str> = params.processed_globs.iter().map(|g| g.as_str()).collect();

    for sample in group_by_sample(files, &params.samples_key) {
        let has_raw = sample.any_file(&params.file_column, |f| params.raw_file_glob.is_match(f));
        if !has_raw {
            continue;
        }

        let has_processed = sample.any_file(&params.file_column, |f| {
            params.processed_globs.iter().any(|g| g.is_match(f))
        });
        if has_processed {
            continue;
        }

        items.push(
            WarningItem::warning(
                WarningKind::MissingProcessedData,
                format!("Sample '{}' has raw reads but no processed data file", sample.id),
                format!("Add a processed file for this sample (one of: {})", candidates.join(", ")),
            )
            .at_row(sample.first_row()),
        );
    }

    items
}
