//! Schema Operations - model-generated DDL, executed in order

use crate::error::AgentError;
use crate::sql::extract_scripts;
use crate::strategy::StrategyCtx;

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let tables = ctx.store.list_tables().await;
    let prompt = format!(
        "REQUEST: \"{}\"\n\n\
         EXISTING TABLES: {}\n\n\
         Generate the DDL statements (CREATE, ALTER, DROP) for PostgreSQL,\n\
         each inside its own ```sql block. Output only the statements that are needed.",
        ctx.request,
        if tables.is_empty() { "(none)".to_string() } else { tables.join(", ") }
    );
    let reply = ctx.llm.complete(&prompt, None, None).await;

    let scripts = extract_scripts(&reply);
    let execution = if scripts.is_empty() {
        AgentError::generation("the model reply contained no DDL statements").to_string()
    } else {
        ctx.store.execute_batch(&scripts).await.render()
    };

    let mut report = String::from("## Schema Operations Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));
    report.push_str(&format!("**Generated commands:**\n{}\n\n", reply));
    report.push_str(&format!("**Results:**\n{}\n", execution));

    report
}
