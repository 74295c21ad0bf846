//! Error types for the cmsync CLI

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the CLI user
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// User-facing error (bad input, missing configuration)
    #[error("{0}")]
    User(String),

    /// The run finished but accumulated sync errors
    #[error("Sync completed with {count} error(s)")]
    SyncFailed { count: u64 },

    /// One or more files failed frontmatter validation
    #[error("{count} file(s) failed validation")]
    ValidationFailed { count: usize },

    /// Core engine error
    #[error(transparent)]
    Core(#[from] cmsync_core::Error),

    /// CMS client error
    #[error(transparent)]
    Client(#[from] cmsync_client::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }
}
