//! Error types for cmsync-content

use std::path::PathBuf;

/// Result type for cmsync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cmsync-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a file or directory
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A frontmatter fence was opened but never closed
    #[error("Unterminated frontmatter fence")]
    UnterminatedFrontmatter,

    /// The frontmatter block is valid YAML but not a mapping
    #[error("Frontmatter must be a YAML mapping, got {found}")]
    FrontmatterNotMapping { found: String },

    /// YAML parse error inside the frontmatter block
    #[error("Invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON conversion error for a frontmatter value
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
