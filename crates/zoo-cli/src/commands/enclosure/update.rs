use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, expect_kind};
use zoo_db::store::EntityStore;
use zoo_db::updates::enclosure::EnclosureUpdate;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_opt;
use crate::context::AppContext;
use crate::output::output;

pub struct Fields<'a> {
    pub name: Option<&'a str>,
    pub area: Option<f64>,
    pub temperature: Option<f64>,
    pub location: Option<&'a str>,
    pub environment: Option<&'a str>,
}

pub async fn run<S: EntityStore>(
    id: &str,
    fields: Fields<'_>,
    ctx: &AppContext<S>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    expect_kind(id, EntityKind::Enclosure)?;

    let update = EnclosureUpdate {
        name: fields.name.map(str::to_string),
        area: fields.area,
        temperature: fields.temperature,
        location: parse_opt(fields.location, "location")?,
        environment: parse_opt(fields.environment, "environment")?,
    };
    if update.is_empty() {
        return Err(ZooError::Validation(
            "at least one of --name, --area, --temperature, --location, or --environment must be provided"
                .into(),
        )
        .into());
    }

    // Inhabitants and caretakers are untouched; admission owns those links.
    let enclosure = ctx.store.update_enclosure(id, update).await?;
    output(&enclosure, flags.format)
}
