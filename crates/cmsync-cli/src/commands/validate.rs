//! Validate command implementation
//!
//! Pre-flight check: scan and schema-validate every configured content type
//! without contacting the CMS.

use std::path::Path;

use colored::Colorize;

use cmsync_content::{Scanner, validate_files};

use super::sync::load_registry;
use crate::error::{CliError, Result};

/// Run the validate command
pub fn run_validate(config_path: &Path) -> Result<()> {
    let (manifest, registry) = load_registry(config_path)?;
    let scanner = Scanner::new(manifest.cms.default_locale.clone());

    println!("{} Validating content...", "=>".blue().bold());

    let mut total_invalid = 0;
    for spec in registry.types() {
        let files = scanner.scan(&spec.dir);
        let total = files.len();
        let validated = validate_files(spec.schema.as_ref(), files);

        if validated.invalid.is_empty() {
            println!(
                "   {} {}: {} file(s) valid",
                "+".green(),
                spec.key.cyan(),
                total
            );
            continue;
        }

        total_invalid += validated.invalid.len();
        println!(
            "   {} {}: {} of {} file(s) invalid",
            "!".red().bold(),
            spec.key.cyan(),
            validated.invalid.len(),
            total
        );
        for invalid in &validated.invalid {
            println!("      {} ({})", invalid.path.display(), invalid.locale);
            for diagnostic in &invalid.errors {
                println!("         {} {}", "-".yellow(), diagnostic);
            }
        }
    }

    if total_invalid > 0 {
        return Err(CliError::ValidationFailed {
            count: total_invalid,
        });
    }
    println!("{} All content valid.", "OK".green().bold());
    Ok(())
}
