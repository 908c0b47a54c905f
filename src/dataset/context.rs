//! Context Builder - Compact structural summaries used to ground prompts

use crate::dataset::frame::{Dataset, source_name};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Rows read per file when building a context
const CONTEXT_PREFIX_ROWS: usize = 3;

/// Rows kept as the sample
const CONTEXT_SAMPLE_ROWS: usize = 2;

/// Read-only summary of one dataset: column names, inferred types, and a
/// small ordered row sample.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetContext {
    pub columns: Vec<String>,
    pub types: BTreeMap<String, String>,
    pub sample: Vec<BTreeMap<String, String>>,
}

/// One entry per source: either a context or a captured read error
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ContextEntry {
    Context(DatasetContext),
    Error { error: String },
}

impl DatasetContext {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let columns: Vec<String> = dataset.columns.iter().map(|c| c.name.clone()).collect();

        let types = dataset
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.dtype.to_string()))
            .collect();

        let sample = dataset
            .preview(CONTEXT_SAMPLE_ROWS)
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row.iter())
                    .map(|(name, cell)| (name.clone(), cell.clone()))
                    .collect()
            })
            .collect();

        Self { columns, types, sample }
    }
}

/// Build a context for every source. A failed read becomes an error entry
/// for that source only; total entries always equals total sources.
pub fn build_contexts(paths: &[PathBuf]) -> BTreeMap<String, ContextEntry> {
    let mut contexts = BTreeMap::new();

    for path in paths {
        let name = source_name(path);
        let entry = match Dataset::from_csv_prefix(path, CONTEXT_PREFIX_ROWS) {
            Ok(dataset) => ContextEntry::Context(DatasetContext::from_dataset(&dataset)),
            Err(e) => ContextEntry::Error { error: e.to_string() },
        };
        contexts.insert(name, entry);
    }

    debug!(sources = paths.len(), "dataset contexts built");
    contexts
}

/// Serialize the context map for embedding in prompts
pub fn to_json(contexts: &BTreeMap<String, ContextEntry>) -> serde_json::Value {
    serde_json::to_value(contexts).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_context_has_columns_types_and_bounded_sample() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"id,valor\n1,10\n2,20\n3,30\n4,40\n").unwrap();
        file.flush().unwrap();

        let contexts = build_contexts(&[file.path().to_path_buf()]);
        assert_eq!(contexts.len(), 1);

        let entry = contexts.values().next().unwrap();
        match entry {
            ContextEntry::Context(ctx) => {
                assert_eq!(ctx.columns, vec!["id", "valor"]);
                assert_eq!(ctx.types.get("id").unwrap(), "integer");
                assert_eq!(ctx.sample.len(), 2);
            }
            ContextEntry::Error { .. } => panic!("expected a context"),
        }
    }

    #[test]
    fn test_malformed_source_yields_error_entry() {
        let mut good = NamedTempFile::new().unwrap();
        good.write_all(b"a,b\n1,2\n").unwrap();
        good.flush().unwrap();

        let paths = vec![
            good.path().to_path_buf(),
            PathBuf::from("/nonexistent/broken.csv"),
        ];
        let contexts = build_contexts(&paths);

        // total entries = total sources
        assert_eq!(contexts.len(), 2);
        assert!(matches!(
            contexts.get("broken.csv").unwrap(),
            ContextEntry::Error { .. }
        ));
        assert!(matches!(
            contexts.values().next().unwrap(),
            ContextEntry::Context(_) | ContextEntry::Error { .. }
        ));
        let ok_entries = contexts
            .values()
            .filter(|e| matches!(e, ContextEntry::Context(_)))
            .count();
        assert_eq!(ok_entries, 1);
    }
}
