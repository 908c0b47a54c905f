//! Exploratory Analysis - full-file profiling, one subsection per dataset

use crate::dataset::frame::{source_name, Dataset};
use crate::report::render_table;
use crate::strategy::StrategyCtx;
use std::path::PathBuf;

const PREVIEW_ROWS: usize = 3;

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    profile_datasets(ctx.paths, ctx.request)
}

/// Profile every dataset: dimensions, column structure, null counts and a
/// short preview. A read error for one dataset only taints its own section.
pub fn profile_datasets(paths: &[PathBuf], request: &str) -> String {
    let mut report = String::from("## Exploratory Analysis Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", request));

    if paths.is_empty() {
        report.push_str("No datasets were provided.\n");
        return report;
    }

    for path in paths {
        match Dataset::from_csv(path) {
            Ok(dataset) => report.push_str(&profile_section(&dataset)),
            Err(e) => {
                report.push_str(&format!("### {}\n**Error:** {}\n\n", source_name(path), e));
            }
        }
    }

    report
}

fn profile_section(dataset: &Dataset) -> String {
    let mut section = format!("### {}\n", dataset.name);
    section.push_str(&format!(
        "**Dimensions:** {} rows x {} columns\n\n",
        dataset.row_count(),
        dataset.column_count()
    ));

    section.push_str("**Column structure:**\n");
    let null_counts = dataset.null_counts();
    for (column, nulls) in dataset.columns.iter().zip(null_counts) {
        section.push_str(&format!(
            "- `{}`: {} | nulls: {}\n",
            column.name, column.dtype, nulls
        ));
    }

    let headers: Vec<String> = dataset.columns.iter().map(|c| c.name.clone()).collect();
    section.push_str(&format!(
        "\n**Preview (first {} rows):**\n```\n{}\n```\n\n",
        PREVIEW_ROWS.min(dataset.row_count()),
        render_table(&headers, dataset.preview(PREVIEW_ROWS), PREVIEW_ROWS)
    ));

    section
}
