//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use cmsync_client::HttpCmsClient;
use cmsync_core::{Manifest, Registry, RunReport, SyncEngine, SyncOptions};

use crate::error::{CliError, Result};

/// Load the manifest and build the registry rooted at its directory.
pub(crate) fn load_registry(config_path: &Path) -> Result<(Manifest, Registry)> {
    if !config_path.exists() {
        return Err(CliError::user(format!(
            "Configuration not found at {}",
            config_path.display()
        )));
    }
    let manifest = Manifest::load(config_path)?;
    let root = config_path.parent().unwrap_or_else(|| Path::new("."));
    let registry = Registry::from_manifest(&manifest, root)?;
    Ok((manifest, registry))
}

/// Run the sync command
pub async fn run_sync(
    config_path: &Path,
    dry_run: bool,
    json: bool,
    content_types: &[String],
) -> Result<()> {
    let (manifest, registry) = load_registry(config_path)?;

    let token = std::env::var(&manifest.cms.token_env).map_err(|_| {
        CliError::user(format!(
            "Environment variable {} is not set",
            manifest.cms.token_env
        ))
    })?;
    let client = HttpCmsClient::new(&manifest.cms.base_url, &token)?;

    if !json {
        let mode = if dry_run { " (dry run)" } else { "" };
        println!("{} Syncing content{}...", "=>".blue().bold(), mode);
    }

    let engine = SyncEngine::new(
        &client,
        &registry,
        &manifest.cms.default_locale,
        SyncOptions { dry_run },
    );
    let filter = (!content_types.is_empty()).then_some(content_types);
    let report = engine.sync(filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.totals.errors > 0 {
        return Err(CliError::SyncFailed {
            count: report.totals.errors,
        });
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    for outcome in &report.content_types {
        let marker = if outcome.result.errors > 0 {
            "!".red().bold()
        } else {
            "+".green()
        };
        println!(
            "   {} {}: {} created, {} updated, {} deleted, {} errors",
            marker,
            outcome.key.cyan(),
            outcome.result.created,
            outcome.result.updated,
            outcome.result.deleted,
            outcome.result.errors
        );
    }

    let totals = &report.totals;
    if totals.errors == 0 {
        println!(
            "{} Sync complete: {} created, {} updated, {} deleted.",
            "OK".green().bold(),
            totals.created,
            totals.updated,
            totals.deleted
        );
    } else {
        println!(
            "{} Sync finished with {} error(s).",
            "FAILED".red().bold(),
            totals.errors
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_a_user_error() {
        let temp = TempDir::new().unwrap();
        let err = load_registry(&temp.path().join("cmsync.toml")).unwrap_err();
        assert!(matches!(err, CliError::User(_)));
    }

    #[test]
    fn test_registry_rooted_at_manifest_directory() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("cmsync.toml");
        fs::write(
            &config,
            "[cms]\nbase-url = \"http://localhost\"\n\n[content-types.blog]\ndir = \"content/blog\"\ncms-type-id = \"posts\"\n",
        )
        .unwrap();

        let (_, registry) = load_registry(&config).unwrap();
        let spec = registry.get("blog").unwrap();
        assert_eq!(spec.dir, temp.path().join("content/blog"));
    }

    #[tokio::test]
    async fn test_missing_token_env_is_a_user_error() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("cmsync.toml");
        fs::write(
            &config,
            "[cms]\nbase-url = \"http://localhost\"\ntoken-env = \"CMSYNC_TEST_UNSET_TOKEN\"\n",
        )
        .unwrap();

        let err = run_sync(&config, true, false, &[]).await.unwrap_err();
        assert!(matches!(err, CliError::User(_)));
    }
}
