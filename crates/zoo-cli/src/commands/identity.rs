use serde::Serialize;
use zoo_core::ids::EntityKind;
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IdentityCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IssuedResponse {
    kind: EntityKind,
    id: String,
    durable: bool,
}

/// Handle `zoo identity`.
pub async fn handle<S: EntityStore>(
    action: &IdentityCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let IdentityCommands::Issue { kind } = action;
    let kind = kind.parse::<EntityKind>()?;
    let id = ctx.registrar().issue(kind).await?;
    tracing::debug!(%kind, %id, "issued identifier on request");

    output(
        &IssuedResponse {
            kind,
            id,
            durable: ctx.issuer.is_durable(),
        },
        flags.format,
    )
}
