use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;
use zoo_db::updates::animal::AnimalUpdate;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: EntityStore>(
    id: &str,
    name: Option<&str>,
    age: Option<u8>,
    gender: Option<&str>,
    health: Option<&str>,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Animal)?;

    let update = AnimalUpdate {
        name: name.map(str::to_string),
        age,
        gender: parse_opt(gender, "gender")?,
        health: parse_opt(health, "health")?,
    };
    if update.is_empty() {
        return Err(ZooError::Validation(
            "at least one of --name, --age, --gender, or --health must be provided".into(),
        )
        .into());
    }

    let animal = ctx.store.update_animal(id, update).await?;
    output(&animal, flags.format)
}
