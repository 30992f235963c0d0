mod register;
mod update;

use serde::Serialize;
use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EnclosureCommands;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::context::AppContext;
use crate::output::output;

/// Handle `zoo enclosure`.
pub async fn handle<S: EntityStore>(
    action: &EnclosureCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EnclosureCommands::Register {
            name,
            area,
            temperature,
            location,
            environment,
        } => {
            let fields = register::Fields {
                name,
                area: *area,
                temperature: *temperature,
                location,
                environment,
            };
            register::run(fields, ctx, flags).await
        }
        EnclosureCommands::Get { id } => {
            expect_kind(id, EntityKind::Enclosure)?;
            let enclosure = ctx
                .store
                .find_enclosure(id)
                .await?
                .ok_or_else(|| not_found(id))?;
            output(&enclosure, flags.format)
        }
        EnclosureCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let mut enclosures = ctx.store.list_enclosures().await?;
            truncate_to(&mut enclosures, limit);
            output(&enclosures, flags.format)
        }
        EnclosureCommands::Update {
            id,
            name,
            area,
            temperature,
            location,
            environment,
        } => {
            let fields = update::Fields {
                name: name.as_deref(),
                area: *area,
                temperature: *temperature,
                location: location.as_deref(),
                environment: environment.as_deref(),
            };
            update::run(id, fields, ctx, flags).await
        }
        EnclosureCommands::Delete { id } => delete(id, ctx, flags).await,
    }
}

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

async fn delete<S: EntityStore>(id: &str, ctx: &AppContext<S>, flags: &GlobalFlags) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Enclosure)?;
    if !ctx.store.delete_enclosure(id).await? {
        return Err(not_found(id).into());
    }
    output(&DeleteResponse { id, deleted: true }, flags.format)
}

fn not_found(id: &str) -> ZooError {
    ZooError::NotFound {
        kind: EntityKind::Enclosure,
        id: id.to_string(),
    }
}
