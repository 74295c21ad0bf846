//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cmsync - Reconcile MDX content with a headless CMS
#[derive(Parser, Debug)]
#[command(name = "cmsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration manifest
    #[arg(short, long, global = true, default_value = "cmsync.toml")]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize on-disk content into the CMS
    ///
    /// Examples:
    ///   cmsync sync                     # Sync every configured content type
    ///   cmsync sync --dry-run           # Preview without touching the CMS
    ///   cmsync sync -t blog -t pages    # Restrict to named content types
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON for CI/CD integration
        #[arg(long)]
        json: bool,

        /// Restrict the run to one or more content types
        #[arg(short = 't', long = "content-type")]
        content_types: Vec<String>,
    },

    /// Scan and validate content frontmatter without touching the CMS
    Validate,
}
