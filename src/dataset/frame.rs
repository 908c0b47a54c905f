//! Dataset - In-memory tabular structure loaded from a delimited file

use crate::error::{AgentError, AgentResult};
use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Inferred scalar type of a column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Date,
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        };
        write!(f, "{}", label)
    }
}

/// A named column with its inferred type
#[derive(Clone, Debug)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// In-memory tabular structure. Immutable once loaded for the duration of
/// a single request; cells are kept as the strings read from the file.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Source file name (with extension), used as the dataset identifier
    pub name: String,

    /// Ordered columns
    pub columns: Vec<Column>,

    /// Row data, one cell per column
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Read a whole CSV file
    pub fn from_csv(path: &Path) -> AgentResult<Self> {
        Self::load(path, None)
    }

    /// Read a bounded prefix of a CSV file (header plus at most `limit` rows)
    pub fn from_csv_prefix(path: &Path, limit: usize) -> AgentResult<Self> {
        Self::load(path, Some(limit))
    }

    fn load(path: &Path, limit: Option<usize>) -> AgentResult<Self> {
        let name = source_name(path);

        let mut reader = Reader::from_path(path)
            .map_err(|e| AgentError::ingestion_with_path(e.to_string(), path.display().to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| AgentError::ingestion_with_path(e.to_string(), path.display().to_string()))?
            .clone();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                AgentError::ingestion_with_path(e.to_string(), path.display().to_string())
            })?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
            if let Some(limit) = limit {
                if rows.len() >= limit {
                    break;
                }
            }
        }

        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| Column {
                name: header.to_string(),
                dtype: infer_column_type(rows.iter().map(|r| r.get(idx).map(String::as_str))),
            })
            .collect();

        Ok(Self { name, columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Count of empty cells per column, in column order
    pub fn null_counts(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|idx| {
                self.rows
                    .iter()
                    .filter(|row| row.get(idx).map(|c| c.trim().is_empty()).unwrap_or(true))
                    .count()
            })
            .collect()
    }

    /// Indices of numeric (integer or float) columns, in column order
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.dtype.is_numeric())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// First `n` rows
    pub fn preview(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }
}

/// File name (with extension) used as the dataset identifier
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Infer a column type from its values. All non-empty values must agree;
/// an all-empty column is text.
fn infer_column_type<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ColumnType {
    let non_empty: Vec<&str> = values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    if non_empty.is_empty() {
        return ColumnType::Text;
    }
    if non_empty.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if non_empty.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if non_empty
        .iter()
        .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
    {
        return ColumnType::Boolean;
    }
    if non_empty.iter().all(|v| parses_as_date(v)) {
        return ColumnType::Date;
    }
    ColumnType::Text
}

fn parses_as_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%d/%m/%Y").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_and_infer_types() {
        let file = write_csv("id,price,active,day,label\n1,9.5,true,2024-01-01,a\n2,10.0,false,2024-01-02,b\n");
        let ds = Dataset::from_csv(file.path()).unwrap();

        assert_eq!(ds.column_count(), 5);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.columns[0].dtype, ColumnType::Integer);
        assert_eq!(ds.columns[1].dtype, ColumnType::Float);
        assert_eq!(ds.columns[2].dtype, ColumnType::Boolean);
        assert_eq!(ds.columns[3].dtype, ColumnType::Date);
        assert_eq!(ds.columns[4].dtype, ColumnType::Text);
    }

    #[test]
    fn test_prefix_read_is_bounded() {
        let file = write_csv("id\n1\n2\n3\n4\n5\n");
        let ds = Dataset::from_csv_prefix(file.path(), 3).unwrap();
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn test_null_counts() {
        let file = write_csv("a,b\n1,\n,x\n3,y\n");
        let ds = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(ds.null_counts(), vec![1, 1]);
    }

    #[test]
    fn test_mixed_int_float_column_is_float() {
        let file = write_csv("v\n1\n2.5\n3\n");
        let ds = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(ds.columns[0].dtype, ColumnType::Float);
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let err = Dataset::from_csv(Path::new("/nonexistent/never.csv")).unwrap_err();
        assert!(matches!(err, AgentError::Ingestion { .. }));
    }
}
