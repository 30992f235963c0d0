use std::path::Path;

use anyhow::Context;
use zoo_config::ZooConfig;

/// Load `.env` (project root first, then the working directory) and
/// extract the layered configuration for `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<ZooConfig> {
    load_project_dotenv(project_root)?;
    ZooConfig::load_from(project_root).map_err(anyhow::Error::from)
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::anyhow!("failed to load dotenv file: {error}")),
    }
}
