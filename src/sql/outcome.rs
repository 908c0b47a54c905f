//! Execution outcomes - explicit result values, never exceptions
//!
//! Every statement produces exactly one `SqlOutcome`; a batch aggregates
//! them in input order, and one failure never halts the rest.

use crate::report::render_table;
use std::fmt;

/// Rows shown when rendering a result set into a report
const MAX_RENDER_ROWS: usize = 20;

/// Per-statement result: materialized rows for a read, a success marker
/// for a write, or a captured error.
#[derive(Clone, Debug)]
pub enum SqlOutcome {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Done {
        affected: u64,
    },
    Failed {
        message: String,
    },
}

impl SqlOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SqlOutcome::Failed { .. })
    }
}

impl fmt::Display for SqlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlOutcome::Rows { columns, rows } => {
                writeln!(f, "{} row(s)", rows.len())?;
                write!(f, "{}", render_table(columns, rows, MAX_RENDER_ROWS))
            }
            SqlOutcome::Done { affected } => {
                write!(f, "ok ({} rows affected)", affected)
            }
            SqlOutcome::Failed { message } => write!(f, "SQL error: {}", message),
        }
    }
}

/// One statement paired with its outcome
#[derive(Clone, Debug)]
pub struct BatchEntry {
    pub statement: String,
    pub outcome: SqlOutcome,
}

/// Outcomes for a whole script, in input order
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub entries: Vec<BatchEntry>,
}

impl BatchOutcome {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failure()).count()
    }

    /// Render the batch as one multi-part report fragment
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("---\n{}\nResult: {}", entry.statement, entry.outcome))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_render_keeps_order_and_error_text() {
        let batch = BatchOutcome {
            entries: vec![
                BatchEntry {
                    statement: "CREATE TABLE t (id INT)".to_string(),
                    outcome: SqlOutcome::Done { affected: 0 },
                },
                BatchEntry {
                    statement: "INSERT INTO missing VALUES (1)".to_string(),
                    outcome: SqlOutcome::Failed {
                        message: "relation \"missing\" does not exist".to_string(),
                    },
                },
                BatchEntry {
                    statement: "INSERT INTO t VALUES (1)".to_string(),
                    outcome: SqlOutcome::Done { affected: 1 },
                },
            ],
        };

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.failure_count(), 1);

        let rendered = batch.render();
        let create = rendered.find("CREATE TABLE t").unwrap();
        let failing = rendered.find("INSERT INTO missing").unwrap();
        let last = rendered.find("INSERT INTO t VALUES").unwrap();
        assert!(create < failing && failing < last);
        assert!(rendered.contains("does not exist"));
    }

    #[test]
    fn test_rows_outcome_displays_table() {
        let outcome = SqlOutcome::Rows {
            columns: vec!["n".to_string()],
            rows: vec![vec!["1".to_string()]],
        };
        let text = outcome.to_string();
        assert!(text.contains("1 row(s)"));
        assert!(text.contains('n'));
    }
}
