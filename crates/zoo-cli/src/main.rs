use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use zoo_admission::AdmissionError;
use zoo_config::StorageBackend;
use zoo_core::errors::ZooError;
use zoo_db::error::DatabaseError;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod prompter;
mod ui;

/// Exit status for refusals that are part of normal operation.
const EXIT_EXPECTED: i32 = 2;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        if let Some(domain) = expected_domain_error(&error) {
            eprintln!("{}: {}", domain.code(), domain.user_message());
            tracing::debug!(%domain, "command refused");
            std::process::exit(EXIT_EXPECTED);
        }
        eprintln!("zoo error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.quiet, flags.verbose)?;
    ui::init(&flags);

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let ctx = context::AppContext::open_durable(project_root, config)
                .await
                .context("failed to open the zoo database")?;
            commands::dispatch::dispatch(cli.command, &ctx, &flags).await
        }
        StorageBackend::Memory => {
            tracing::warn!("memory backend: records are discarded when the command exits");
            let ctx = context::AppContext::in_memory(project_root, config);
            commands::dispatch::dispatch(cli.command, &ctx, &flags).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ZOO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == context::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.zoo' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(context::find_project_root(&start).unwrap_or(start))
}

/// The domain error behind `error`, if it is one the user should simply be told about.
fn expected_domain_error(error: &anyhow::Error) -> Option<&ZooError> {
    let domain = error
        .downcast_ref::<ZooError>()
        .or_else(|| error.downcast_ref::<DatabaseError>().and_then(DatabaseError::domain))
        .or_else(|| error.downcast_ref::<AdmissionError>().and_then(AdmissionError::domain))?;
    domain.is_expected().then_some(domain)
}

#[cfg(test)]
mod tests {
    use zoo_core::errors::SelectionStage;
    use zoo_core::ids::EntityKind;

    use super::*;

    #[test]
    fn domain_refusals_are_recognised_through_wrappers() {
        let direct = anyhow::Error::from(ZooError::NotFound {
            kind: EntityKind::Animal,
            id: "A-0009".into(),
        });
        assert_eq!(expected_domain_error(&direct).map(ZooError::code), Some("not_found"));

        let stored = anyhow::Error::from(DatabaseError::Domain(ZooError::Validation("bad".into())));
        assert_eq!(expected_domain_error(&stored).map(ZooError::code), Some("validation"));

        let admission = anyhow::Error::from(AdmissionError::from(ZooError::SelectionAborted {
            stage: SelectionStage::Container,
            attempts: 3,
        }));
        assert_eq!(
            expected_domain_error(&admission).map(ZooError::code),
            Some("selection_aborted")
        );
    }

    #[test]
    fn identity_faults_are_not_expected() {
        let error = anyhow::Error::from(ZooError::IdentityCorruption {
            prefix: "A".into(),
            detail: "counter moved backwards".into(),
        });
        assert!(expected_domain_error(&error).is_none());

        let storage = anyhow::Error::from(DatabaseError::NoResult);
        assert!(expected_domain_error(&storage).is_none());
    }

    #[test]
    fn project_override_accepts_the_data_directory() {
        let temp = tempfile::TempDir::new().expect("tempdir should create");
        let data_dir = temp.path().join(".zoo");
        std::fs::create_dir(&data_dir).expect(".zoo should create");

        let root = resolve_project_root(data_dir.to_str()).expect("root should resolve");
        assert_eq!(root, temp.path());
    }

    #[test]
    fn project_override_must_exist() {
        let err = resolve_project_root(Some("/definitely/not/a/zoo")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
