//! Store Adapter - PostgreSQL round trips via tokio-postgres
//!
//! The connection is acquired per logical unit of work (per statement, per
//! load, per listing) and dropped right after; each write commits on its
//! own. `execute` never raises: every driver failure becomes an outcome
//! value.

use crate::config::DbConfig;
use crate::dataset::Dataset;
use crate::error::{AgentError, AgentResult};
use crate::sql::outcome::{BatchEntry, BatchOutcome, SqlOutcome};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, info, warn};

/// PostgreSQL store client
pub struct StoreClient {
    config: DbConfig,
}

impl StoreClient {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> AgentResult<Client> {
        let (client, connection) = tokio_postgres::connect(&self.config.connection_string(), NoTls)
            .await
            .map_err(|e| AgentError::backend(format!("failed to connect to postgres: {}", e)))?;

        // The connection object drives the socket until the client drops
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "postgres connection error");
            }
        });

        Ok(client)
    }

    /// Execute one statement. Reads materialize the full result set; writes
    /// commit immediately and report the affected row count. All failures
    /// are converted into `SqlOutcome::Failed`.
    pub async fn execute(&self, statement: &str) -> SqlOutcome {
        debug!(statement, "executing statement");
        match self.try_execute(statement).await {
            Ok(outcome) => outcome,
            Err(e) => SqlOutcome::Failed { message: e.to_string() },
        }
    }

    async fn try_execute(&self, statement: &str) -> AgentResult<SqlOutcome> {
        let client = self.connect().await?;

        if is_query(statement) {
            let prepared = client
                .prepare(statement)
                .await
                .map_err(|e| AgentError::execution_with_statement(e.to_string(), statement))?;
            let columns: Vec<String> = prepared
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect();
            let rows = client
                .query(&prepared, &[])
                .await
                .map_err(|e| AgentError::execution_with_statement(e.to_string(), statement))?;
            let rows = rows.iter().map(row_to_strings).collect();
            Ok(SqlOutcome::Rows { columns, rows })
        } else {
            let affected = client
                .execute(statement, &[])
                .await
                .map_err(|e| AgentError::execution_with_statement(e.to_string(), statement))?;
            Ok(SqlOutcome::Done { affected })
        }
    }

    /// Run a batch of statements strictly in order. A failing statement
    /// never halts the remaining batch.
    pub async fn execute_batch(&self, statements: &[String]) -> BatchOutcome {
        let mut entries = Vec::with_capacity(statements.len());

        for statement in statements {
            let outcome = self.execute(statement).await;
            if let SqlOutcome::Failed { message } = &outcome {
                warn!(statement = %statement, error = %message, "statement failed, batch continues");
            }
            entries.push(BatchEntry {
                statement: statement.clone(),
                outcome,
            });
        }

        BatchOutcome { entries }
    }

    /// Load a dataset into a table, replacing any existing table of that
    /// name. All columns are created as TEXT.
    pub async fn load_table(&self, table: &str, dataset: &Dataset) -> AgentResult<usize> {
        let client = self.connect().await?;

        let drop_sql = format!("DROP TABLE IF EXISTS \"{}\"", table);
        client
            .execute(&drop_sql, &[])
            .await
            .map_err(|e| AgentError::execution_with_statement(e.to_string(), drop_sql))?;

        let column_defs: Vec<String> = dataset
            .columns
            .iter()
            .map(|c| format!("\"{}\" TEXT", sanitize_identifier(&c.name)))
            .collect();
        let create_sql = format!("CREATE TABLE \"{}\" ({})", table, column_defs.join(", "));
        client
            .execute(&create_sql, &[])
            .await
            .map_err(|e| AgentError::execution_with_statement(e.to_string(), create_sql))?;

        let placeholders: Vec<String> = (1..=dataset.column_count())
            .map(|i| format!("${}", i))
            .collect();
        let insert_sql = format!(
            "INSERT INTO \"{}\" VALUES ({})",
            table,
            placeholders.join(", ")
        );
        let prepared = client
            .prepare(&insert_sql)
            .await
            .map_err(|e| AgentError::execution_with_statement(e.to_string(), insert_sql))?;

        for row in &dataset.rows {
            let params: Vec<&(dyn ToSql + Sync)> =
                row.iter().map(|v| v as &(dyn ToSql + Sync)).collect();
            client
                .execute(&prepared, &params)
                .await
                .map_err(|e| AgentError::execution(e.to_string()))?;
        }

        info!(table, rows = dataset.row_count(), "dataset staged");
        Ok(dataset.row_count())
    }

    /// Names of existing tables in the public schema; failures degrade to
    /// an empty list.
    pub async fn list_tables(&self) -> Vec<String> {
        match self.try_list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                warn!(error = %e, "could not list tables");
                Vec::new()
            }
        }
    }

    async fn try_list_tables(&self) -> AgentResult<Vec<String>> {
        let client = self.connect().await?;
        let rows = client
            .query(
                "SELECT tablename::text FROM pg_tables WHERE schemaname = 'public' ORDER BY tablename",
                &[],
            )
            .await
            .map_err(|e| AgentError::execution(e.to_string()))?;
        Ok(rows.iter().map(|r| r.get::<_, String>(0)).collect())
    }
}

/// Leading-keyword read/write classification, case-insensitive
pub fn is_query(statement: &str) -> bool {
    let trimmed = statement.trim_start();
    trimmed
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("select"))
        .unwrap_or(false)
}

/// Derive a table name from a source file name: extension stripped,
/// lower-cased, non-alphanumeric characters mapped to underscores.
pub fn table_name_for(prefix: &str, source: &str) -> String {
    let stem = match source.rfind('.') {
        Some(idx) if idx > 0 => &source[..idx],
        _ => source,
    };
    let normalized: String = stem
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}{}", prefix, normalized)
}

fn sanitize_identifier(name: &str) -> String {
    name.replace(' ', "_").replace('-', "_").replace('"', "")
}

fn row_to_strings(row: &Row) -> Vec<String> {
    (0..row.len()).map(|idx| cell_to_string(row, idx)).collect()
}

fn cell_to_string(row: &Row, idx: usize) -> String {
    if let Ok(v) = row.try_get::<_, Option<String>>(idx) {
        return v.unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(v) = row.try_get::<_, i64>(idx) {
        return v.to_string();
    }
    if let Ok(v) = row.try_get::<_, i32>(idx) {
        return v.to_string();
    }
    if let Ok(v) = row.try_get::<_, f64>(idx) {
        return v.to_string();
    }
    if let Ok(v) = row.try_get::<_, bool>(idx) {
        return v.to_string();
    }
    "?".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_query_leading_keyword() {
        assert!(is_query("SELECT 1"));
        assert!(is_query("  select * from t"));
        assert!(!is_query("INSERT INTO t VALUES (1)"));
        assert!(!is_query("CREATE TABLE t (id INT)"));
        assert!(!is_query(""));
    }

    #[test]
    fn test_table_name_normalization() {
        assert_eq!(table_name_for("stg_", "Sales Data.csv"), "stg_sales_data");
        assert_eq!(table_name_for("qry_", "orders.csv"), "qry_orders");
        assert_eq!(table_name_for("stg_", "noext"), "stg_noext");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("unit price"), "unit_price");
        assert_eq!(sanitize_identifier("a-b\"c"), "a_bc");
    }
}
