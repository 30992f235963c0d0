mod list;

use serde::Serialize;
use zoo_core::entities::NewKeeper;
use zoo_core::enums::{Department, Rank, WorkingStatus};
use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;
use zoo_db::updates::keeper::KeeperUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::KeeperCommands;
use crate::commands::shared::parse::{parse_enum, parse_opt};
use crate::context::AppContext;
use crate::output::output;

/// Handle `zoo keeper`.
pub async fn handle<S: EntityStore>(
    action: &KeeperCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        KeeperCommands::Register {
            name,
            department,
            rank,
            status,
            danger_handling,
            license,
        } => {
            let new = NewKeeper {
                name: name.clone(),
                department: parse_enum::<Department>(department, "department")?,
                rank: parse_enum::<Rank>(rank, "rank")?,
                working_status: parse_enum::<WorkingStatus>(status, "status")?,
                danger_handling: *danger_handling,
                licenses: license.clone(),
            };
            let keeper = ctx.registrar().register_keeper(new).await?;
            output(&keeper, flags.format)
        }
        KeeperCommands::Get { id } => {
            expect_kind(id, EntityKind::ZooKeeper)?;
            let keeper = ctx.store.find_keeper(id).await?.ok_or_else(|| not_found(id))?;
            output(&keeper, flags.format)
        }
        KeeperCommands::List {
            available,
            department,
        } => list::run(*available, department.as_deref(), ctx, flags).await,
        KeeperCommands::Update {
            id,
            name,
            department,
            rank,
            status,
            danger_handling,
            license,
        } => {
            expect_kind(id, EntityKind::ZooKeeper)?;
            let update = KeeperUpdate {
                name: name.clone(),
                department: parse_opt(department.as_deref(), "department")?,
                rank: parse_opt(rank.as_deref(), "rank")?,
                working_status: parse_opt(status.as_deref(), "status")?,
                danger_handling: *danger_handling,
                licenses: license.clone(),
            };
            if update.is_empty() {
                return Err(ZooError::Validation("no keeper fields to update".into()).into());
            }
            // Going on leave keeps existing caretaker links; it only blocks new ones.
            let keeper = ctx.store.update_keeper(id, update).await?;
            output(&keeper, flags.format)
        }
        KeeperCommands::Delete { id } => {
            expect_kind(id, EntityKind::ZooKeeper)?;
            if !ctx.store.delete_keeper(id).await? {
                return Err(not_found(id).into());
            }
            output(&DeleteResponse { id, deleted: true }, flags.format)
        }
    }
}

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

fn not_found(id: &str) -> ZooError {
    ZooError::NotFound {
        kind: EntityKind::ZooKeeper,
        id: id.to_string(),
    }
}
