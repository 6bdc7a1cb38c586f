mod config;
mod surveys;
mod sync;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sync(args) => sync::handle(&args, ctx, flags).await,
        Commands::Surveys => surveys::handle(ctx),
        Commands::Config => config::handle(ctx),
    }
}
