use zoo_core::entities::NewEnclosure;
use zoo_core::enums::{EnvironmentType, LocationType};
use zoo_db::store::EntityStore;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct Fields<'a> {
    pub name: &'a str,
    pub area: f64,
    pub temperature: f64,
    pub location: &'a str,
    pub environment: &'a str,
}

pub async fn run<S: EntityStore>(
    fields: Fields<'_>,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let new = NewEnclosure {
        name: fields.name.to_string(),
        area: fields.area,
        temperature: fields.temperature,
        location: parse_enum::<LocationType>(fields.location, "location")?,
        environment: parse_enum::<EnvironmentType>(fields.environment, "environment")?,
    };

    let enclosure = ctx.registrar().register_enclosure(new).await?;
    output(&enclosure, flags.format)
}
