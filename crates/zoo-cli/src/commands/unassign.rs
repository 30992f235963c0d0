use serde::Serialize;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UnassignCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UnassignResponse<'a> {
    enclosure_id: &'a str,
    keeper_id: &'a str,
    removed: bool,
}

/// Handle `zoo unassign`.
pub async fn handle<S: EntityStore>(
    action: &UnassignCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let UnassignCommands::Keeper { enclosure, keeper } = action;
    expect_kind(enclosure, EntityKind::Enclosure)?;
    expect_kind(keeper, EntityKind::ZooKeeper)?;

    let removed = ctx.store.remove_caretaker(enclosure, keeper).await?;
    if !removed {
        tracing::info!(%enclosure, %keeper, "no caretaker link to remove");
    }
    output(
        &UnassignResponse {
            enclosure_id: enclosure,
            keeper_id: keeper,
            removed,
        },
        flags.format,
    )
}
