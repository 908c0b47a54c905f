//! Reporting - narrative analysis wrapped under a fixed header

use crate::dataset::context;
use crate::dataset::frame::source_name;
use crate::strategy::StrategyCtx;

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let prompt = format!(
        "REQUEST: \"{}\"\n\n\
         Produce a complete analytical report including:\n\
         1. Descriptive analysis\n\
         2. Key insights\n\
         3. Recommendations",
        ctx.request
    );

    // heavyweight analysis goes to the larger configured model
    let analysis = ctx
        .llm
        .complete(
            &prompt,
            Some(&context::to_json(ctx.contexts)),
            Some(&ctx.config.llm.full_model),
        )
        .await;

    let files: Vec<String> = ctx.paths.iter().map(|p| source_name(p)).collect();

    let mut report = String::from("## Analytical Report\n\n");
    report.push_str(&format!("**Request:** {}\n\n", ctx.request));
    report.push_str(&format!(
        "**Files analyzed:** {}\n\n",
        if files.is_empty() { "(none)".to_string() } else { files.join(", ") }
    ));
    report.push_str(&format!("**Analysis:**\n{}\n", analysis));

    report
}
