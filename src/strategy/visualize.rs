//! Visualization - chart shape selection over the first dataset
//!
//! Rendering is delegated to the presentation layer; this strategy only
//! decides the shape and its parameters.

use crate::dataset::frame::{source_name, Dataset};
use crate::strategy::StrategyCtx;
use serde::Serialize;
use std::collections::HashMap;

pub const HISTOGRAM_BINS: usize = 10;
pub const TOP_VALUES: usize = 8;

/// Chart shape and parameters, handed to the presentation layer as a
/// side-channel next to the textual report.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter { x: String, y: String },
    Histogram { column: String, bins: usize },
    Bar { column: String, top: Vec<(String, usize)> },
}

impl ChartSpec {
    pub fn describe(&self) -> String {
        match self {
            ChartSpec::Scatter { x, y } => format!("scatter plot of {} vs {}", x, y),
            ChartSpec::Histogram { column, bins } => {
                format!("histogram of {} ({} bins)", column, bins)
            }
            ChartSpec::Bar { column, top } => {
                format!("bar chart of the top {} values of {}", top.len(), column)
            }
        }
    }
}

/// Fixed decision rule: two or more numeric columns give a scatter of the
/// first two, exactly one gives a histogram, none gives a bar chart of the
/// most frequent values of the first column. A dataset without columns has
/// nothing to chart.
pub fn chart_for(dataset: &Dataset) -> Option<ChartSpec> {
    if dataset.columns.is_empty() {
        return None;
    }

    let numeric = dataset.numeric_columns();
    let spec = match numeric.len() {
        n if n >= 2 => ChartSpec::Scatter {
            x: dataset.columns[numeric[0]].name.clone(),
            y: dataset.columns[numeric[1]].name.clone(),
        },
        1 => ChartSpec::Histogram {
            column: dataset.columns[numeric[0]].name.clone(),
            bins: HISTOGRAM_BINS,
        },
        _ => ChartSpec::Bar {
            column: dataset.columns[0].name.clone(),
            top: top_values(dataset, 0, TOP_VALUES),
        },
    };
    Some(spec)
}

/// Most frequent values of one column, count-descending with value order
/// breaking ties for determinism.
fn top_values(dataset: &Dataset, column: usize, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in &dataset.rows {
        if let Some(cell) = row.get(column) {
            *counts.entry(cell.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> (String, Option<ChartSpec>) {
    let mut report = String::from("## Visualization Report\n\n");

    let Some(first) = ctx.paths.first() else {
        report.push_str("At least one dataset upload is required for visualizations.\n");
        return (report, None);
    };

    let dataset = match Dataset::from_csv(first) {
        Ok(dataset) => dataset,
        Err(e) => {
            report.push_str(&format!("**Error:** {} ({})\n", e, source_name(first)));
            return (report, None);
        }
    };

    report.push_str(&format!("**File:** {}\n\n", dataset.name));
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));

    match chart_for(&dataset) {
        Some(chart) => {
            report.push_str(&format!("**Chart:** {}\n\n", chart.describe()));
            report.push_str("Chart parameters were handed to the presentation layer.\n");
            (report, Some(chart))
        }
        None => {
            report.push_str("The dataset has no columns to chart.\n");
            (report, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset_from(content: &str) -> Dataset {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        Dataset::from_csv(file.path()).unwrap()
    }

    #[test]
    fn test_two_numeric_columns_give_scatter() {
        let ds = dataset_from("x,y,label\n1,2.5,a\n2,3.5,b\n");
        match chart_for(&ds).unwrap() {
            ChartSpec::Scatter { x, y } => {
                assert_eq!(x, "x");
                assert_eq!(y, "y");
            }
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_single_numeric_column_gives_histogram() {
        let ds = dataset_from("name,age\nalice,30\nbob,41\n");
        match chart_for(&ds).unwrap() {
            ChartSpec::Histogram { column, bins } => {
                assert_eq!(column, "age");
                assert_eq!(bins, HISTOGRAM_BINS);
            }
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn test_no_numeric_columns_give_bar_of_first() {
        let ds = dataset_from("city,country\nlisbon,pt\nporto,pt\nlisbon,pt\n");
        match chart_for(&ds).unwrap() {
            ChartSpec::Bar { column, top } => {
                assert_eq!(column, "city");
                assert_eq!(top[0], ("lisbon".to_string(), 2));
                assert_eq!(top[1], ("porto".to_string(), 1));
            }
            other => panic!("expected bar, got {:?}", other),
        }
    }

    #[test]
    fn test_bar_is_capped_at_top_values() {
        let mut content = String::from("tag\n");
        for i in 0..20 {
            content.push_str(&format!("t{:02}\n", i));
        }
        let ds = dataset_from(&content);
        match chart_for(&ds).unwrap() {
            ChartSpec::Bar { top, .. } => assert_eq!(top.len(), TOP_VALUES),
            other => panic!("expected bar, got {:?}", other),
        }
    }
}
