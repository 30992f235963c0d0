use zoo_core::entities::NewAnimal;
use zoo_core::enums::{Gender, HealthStatus, Species};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: EntityStore>(
    name: &str,
    species: &str,
    age: u8,
    gender: &str,
    health: &str,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let new = NewAnimal {
        name: name.to_string(),
        species: parse_enum::<Species>(species, "species")?,
        age,
        gender: parse_enum::<Gender>(gender, "gender")?,
        health: parse_enum::<HealthStatus>(health, "health")?,
    };

    let animal = ctx.registrar().register_animal(new).await?;
    output(&animal, flags.format)
}
