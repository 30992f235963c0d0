mod list;
mod register;
mod update;

use serde::Serialize;
use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `zoo animal`.
pub async fn handle<S: EntityStore>(
    action: &AnimalCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AnimalCommands::Register {
            name,
            species,
            age,
            gender,
            health,
        } => register::run(name, species, *age, gender, health, ctx, flags).await,
        AnimalCommands::Get { id } => get(id, ctx, flags).await,
        AnimalCommands::List {
            available,
            species,
        } => list::run(*available, species.as_deref(), ctx, flags).await,
        AnimalCommands::Update {
            id,
            name,
            age,
            gender,
            health,
        } => {
            update::run(
                id,
                name.as_deref(),
                *age,
                gender.as_deref(),
                health.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        AnimalCommands::Delete { id } => delete(id, ctx, flags).await,
        AnimalCommands::Release { id } => release(id, ctx, flags).await,
    }
}

async fn get<S: EntityStore>(id: &str, ctx: &AppContext<S>, flags: &GlobalFlags) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Animal)?;
    let animal = ctx.store.find_animal(id).await?.ok_or_else(|| not_found(id))?;
    output(&animal, flags.format)
}

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

async fn delete<S: EntityStore>(id: &str, ctx: &AppContext<S>, flags: &GlobalFlags) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Animal)?;
    if !ctx.store.delete_animal(id).await? {
        return Err(not_found(id).into());
    }
    output(&DeleteResponse { id, deleted: true }, flags.format)
}

#[derive(Debug, Serialize)]
struct ReleaseResponse<'a> {
    id: &'a str,
    released_from: Option<String>,
}

async fn release<S: EntityStore>(id: &str, ctx: &AppContext<S>, flags: &GlobalFlags) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Animal)?;
    let released_from = ctx.store.release_animal(id).await?;
    output(&ReleaseResponse { id, released_from }, flags.format)
}

fn not_found(id: &str) -> ZooError {
    ZooError::NotFound {
        kind: EntityKind::Animal,
        id: id.to_string(),
    }
}
