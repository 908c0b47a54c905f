//! Warehouse Creation - staging loads plus a model-designed star schema

use crate::dataset::context;
use crate::dataset::frame::{source_name, Dataset};
use crate::error::AgentError;
use crate::sql::store::table_name_for;
use crate::sql::extract_scripts;
use crate::strategy::StrategyCtx;
use tracing::info;

/// Prefix for staging tables loaded directly from uploads
const STAGING_PREFIX: &str = "stg_";

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let mut staged: Vec<String> = Vec::new();
    let mut load_failures: Vec<String> = Vec::new();

    for path in ctx.paths {
        match Dataset::from_csv(path) {
            Ok(dataset) => {
                let table = table_name_for(STAGING_PREFIX, &dataset.name);
                match ctx.store.load_table(&table, &dataset).await {
                    Ok(rows) => {
                        info!(table = %table, rows, "staging load complete");
                        staged.push(table);
                    }
                    Err(e) => load_failures.push(format!("{}: {}", dataset.name, e)),
                }
            }
            Err(e) => load_failures.push(format!("{}: {}", source_name(path), e)),
        }
    }

    let prompt = format!(
        "REQUEST: {}\n\n\
         Design a star-schema data warehouse with:\n\
         1. Fact and dimension tables\n\
         2. Primary and foreign keys\n\
         3. Complete SQL scripts for PostgreSQL, each inside its own ```sql block\n\n\
         STAGED TABLES: {}",
        ctx.request,
        if staged.is_empty() { "(none)".to_string() } else { staged.join(", ") }
    );
    let design = ctx
        .llm
        .complete(&prompt, Some(&context::to_json(ctx.contexts)), None)
        .await;

    let scripts = extract_scripts(&design);
    let execution = if scripts.is_empty() {
        AgentError::generation("the proposed design contained no SQL blocks").to_string()
    } else {
        ctx.store.execute_batch(&scripts).await.render()
    };

    let mut report = String::from("## Warehouse Creation Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));
    report.push_str(&format!(
        "**Staged tables:** {}\n\n",
        if staged.is_empty() { "(none)".to_string() } else { staged.join(", ") }
    ));
    for failure in &load_failures {
        report.push_str(&format!("**Load error:** {}\n\n", failure));
    }
    report.push_str(&format!("**Proposed design:**\n{}\n\n", design));
    report.push_str(&format!("**Execution results:**\n{}\n", execution));

    report
}
