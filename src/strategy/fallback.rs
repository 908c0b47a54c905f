//! Default strategy - forward the request and context to the model

use crate::dataset::context;
use crate::strategy::StrategyCtx;

pub(crate) async fn run(ctx: &StrategyCtx<'_>) -> String {
    let prompt = format!(
        "REQUEST: \"{}\"\n\n\
         Provide a helpful answer and suggest next steps.",
        ctx.request
    );

    // the raw reply is the report; no SQL is involved on this path
    ctx.llm
        .complete(&prompt, Some(&context::to_json(ctx.contexts)), None)
        .await
}
