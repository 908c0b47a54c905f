//! SQL Querying - one model-generated query, executed and reported

use crate::dataset::frame::{source_name, Dataset};
use crate::error::AgentError;
use crate::sql::store::table_name_for;
use crate::sql::extract_first_script;
use crate::strategy::StrategyCtx;
use tracing::warn;

/// Prefix for tables staged on behalf of ad-hoc queries; deliberately
/// distinct from the warehouse staging prefix.
const QUERY_PREFIX: &str = "qry_";

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let mut staging_notes: Vec<String> = Vec::new();

    // Make the uploads queryable before asking the model for SQL
    for path in ctx.paths {
        match Dataset::from_csv(path) {
            Ok(dataset) => {
                let table = table_name_for(QUERY_PREFIX, &dataset.name);
                if let Err(e) = ctx.store.load_table(&table, &dataset).await {
                    warn!(table = %table, error = %e, "query staging load failed");
                    staging_notes.push(format!("{}: {}", dataset.name, e));
                }
            }
            Err(e) => staging_notes.push(format!("{}: {}", source_name(path), e)),
        }
    }

    let tables = ctx.store.list_tables().await;
    let prompt = format!(
        "Based on the request: \"{}\"\n\n\
         Generate ONE optimized SQL query for PostgreSQL, inside a single ```sql block.\n\
         Include short explanatory comments.\n\n\
         AVAILABLE TABLES: {}",
        ctx.request,
        if tables.is_empty() { "(none)".to_string() } else { tables.join(", ") }
    );
    let reply = ctx.llm.complete(&prompt, None, None).await;

    let mut report = String::from("## SQL Query Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));
    for note in &staging_notes {
        report.push_str(&format!("**Staging error:** {}\n\n", note));
    }

    match extract_first_script(&reply) {
        Some(statement) => {
            let outcome = ctx.store.execute(&statement).await;
            report.push_str(&format!("**Generated query:**\n```sql\n{}\n```\n\n", statement));
            report.push_str(&format!("**Result:**\n```\n{}\n```\n\n", outcome));
            report.push_str(&format!("**Model explanation:**\n{}\n", reply));
        }
        None => {
            report.push_str(&format!(
                "{}\n",
                AgentError::generation(format!(
                    "no SQL query could be generated for: {}",
                    ctx.request
                ))
            ));
        }
    }

    report
}
