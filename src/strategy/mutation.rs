//! Data Mutation - model-generated DML, executed in order
//!
//! Same shape as schema operations, with the dataset context included in
//! the prompt when uploads are present.

use crate::dataset::context;
use crate::error::AgentError;
use crate::sql::extract_scripts;
use crate::strategy::StrategyCtx;

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let tables = ctx.store.list_tables().await;
    let prompt = format!(
        "REQUEST: \"{}\"\n\n\
         EXISTING TABLES: {}\n\n\
         Generate the DML statements (INSERT, UPDATE, DELETE) for PostgreSQL,\n\
         each inside its own ```sql block. Output only the statements that are needed.",
        ctx.request,
        if tables.is_empty() { "(none)".to_string() } else { tables.join(", ") }
    );

    let data_context = (!ctx.paths.is_empty()).then(|| context::to_json(ctx.contexts));
    let reply = ctx.llm.complete(&prompt, data_context.as_ref(), None).await;

    let scripts = extract_scripts(&reply);
    let execution = if scripts.is_empty() {
        AgentError::generation("the model reply contained no DML statements").to_string()
    } else {
        ctx.store.execute_batch(&scripts).await.render()
    };

    let mut report = String::from("## Data Mutation Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));
    report.push_str(&format!("**Generated commands:**\n{}\n\n", reply));
    report.push_str(&format!("**Results:**\n{}\n", execution));

    report
}
