use zoo_core::enums::Species;
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: EntityStore>(
    available: bool,
    species: Option<&str>,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let species = parse_opt::<Species>(species, "species")?;

    let mut animals = if available {
        let mut pool = ctx.store.available_animals().await?.into_values().collect::<Vec<_>>();
        if let Some(species) = species {
            pool.retain(|animal| animal.species == species);
        }
        pool
    } else if let Some(species) = species {
        ctx.store.list_animals_by_species(species).await?
    } else {
        ctx.store.list_animals().await?
    };

    truncate_to(&mut animals, limit);
    output(&animals, flags.format)
}
