//! Report assembly - the agent's response and small rendering helpers

use crate::intent::IntentClassification;
use crate::strategy::visualize::ChartSpec;

/// Final output of one request: a markdown report, the classification that
/// routed it, and (visualization only) a chart side-channel for the
/// presentation layer to render independently.
#[derive(Clone, Debug)]
pub struct AgentResponse {
    pub report: String,
    pub classification: IntentClassification,
    pub chart: Option<ChartSpec>,
}

/// Render rows as a fixed-width text table, truncated at `max_rows`
pub fn render_table(headers: &[String], rows: &[Vec<String>], max_rows: usize) -> String {
    if headers.is_empty() {
        return "(no columns)".to_string();
    }

    let shown = &rows[..rows.len().min(max_rows)];

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in shown {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths.get(idx).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(shown.len() + 2);
    out.push(format_row(headers));
    for row in shown {
        out.push(format_row(row));
    }
    if rows.len() > max_rows {
        out.push(format!("... ({} more rows)", rows.len() - max_rows));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_table_pads_and_truncates() {
        let headers = owned(&["id", "name"]);
        let rows = vec![owned(&["1", "Alice"]), owned(&["2", "Bob"]), owned(&["3", "Eve"])];
        let table = render_table(&headers, &rows, 2);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[3].contains("1 more rows"));
    }

    #[test]
    fn test_render_table_empty_rows() {
        let headers = owned(&["only"]);
        let table = render_table(&headers, &[], 10);
        assert_eq!(table, "only");
    }
}
