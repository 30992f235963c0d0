use zoo_core::enums::Department;
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

pub async fn run<S: EntityStore>(
    available: bool,
    department: Option<&str>,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let department = parse_opt::<Department>(department, "department")?;

    let mut keepers = match (available, department) {
        (true, department) => {
            let mut pool = ctx.store.available_keepers().await?.into_values().collect::<Vec<_>>();
            if let Some(department) = department {
                pool.retain(|keeper| keeper.department == department);
            }
            pool
        }
        (false, Some(department)) => ctx.store.list_keepers_by_department(department).await?,
        (false, None) => ctx.store.list_keepers().await?,
    };

    truncate_to(&mut keepers, limit);
    output(&keepers, flags.format)
}
