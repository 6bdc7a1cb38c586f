use crate::context::AppContext;
use crate::output::output;

/// Handle `survey-sync config`.
pub fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    output(&ctx.config.redacted())
}
