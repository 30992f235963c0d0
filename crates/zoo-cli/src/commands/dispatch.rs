use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch<S: EntityStore>(
    command: Commands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    tracing::debug!(project = %ctx.project_root.display(), "dispatching command");
    match command {
        Commands::Animal { action } => commands::animal::handle(&action, ctx, flags).await,
        Commands::Enclosure { action } => commands::enclosure::handle(&action, ctx, flags).await,
        Commands::Keeper { action } => commands::keeper::handle(&action, ctx, flags).await,
        Commands::Admit { action } => commands::admit::handle(&action, ctx, flags).await,
        Commands::Unassign { action } => commands::unassign::handle(&action, ctx, flags).await,
        Commands::Identity { action } => commands::identity::handle(&action, ctx, flags).await,
    }
}
