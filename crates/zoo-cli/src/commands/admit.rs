use zoo_admission::{AdmissionCoordinator, AdmissionError, AdmissionReport, Preselection, Prompter};
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AdmitCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::prompter::ConsolePrompter;

/// Handle `zoo admit`, prompting on stdin/stdout for any ID not given.
pub async fn handle<S: EntityStore>(
    action: &AdmitCommands,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut prompter = ConsolePrompter::stdio();
    let report = admit(action, ctx, &mut prompter).await?;
    output(&report, flags.format)
}

async fn admit<S: EntityStore, P: Prompter>(
    action: &AdmitCommands,
    ctx: &AppContext<S>,
    prompter: &mut P,
) -> Result<AdmissionReport, AdmissionError> {
    let coordinator = AdmissionCoordinator::new(&ctx.store, ctx.selector());
    match action {
        AdmitCommands::Animal { enclosure, animal } => {
            let preselection = preselection(enclosure.as_deref(), animal.as_deref(), EntityKind::Animal)?;
            coordinator.admit_animal(prompter, &preselection).await
        }
        AdmitCommands::Keeper { enclosure, keeper } => {
            let preselection = preselection(enclosure.as_deref(), keeper.as_deref(), EntityKind::ZooKeeper)?;
            coordinator.assign_keeper(prompter, &preselection).await
        }
    }
}

fn preselection(
    enclosure: Option<&str>,
    resource: Option<&str>,
    kind: EntityKind,
) -> Result<Preselection, AdmissionError> {
    if let Some(id) = enclosure {
        expect_kind(id, EntityKind::Enclosure)?;
    }
    if let Some(id) = resource {
        expect_kind(id, kind)?;
    }
    Ok(Preselection {
        enclosure: enclosure.map(str::to_string),
        resource: resource.map(str::to_string),
    })
}
