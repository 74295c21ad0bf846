//! Error types for cmsync-core

/// Result type for cmsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cmsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Content type key not present in the registry
    #[error("Unsupported content type: {key}")]
    UnsupportedContentType { key: String },

    /// Frontmatter failed its schema when re-validated at transform time
    #[error("Invalid frontmatter for {slug}: {}", errors.join("; "))]
    InvalidFrontmatter { slug: String, errors: Vec<String> },

    /// A manifest named a schema that is not registered
    #[error("Unknown schema {name:?} for content type {key}")]
    UnknownSchema { key: String, name: String },

    // Transparent wrappers for underlying crate errors
    /// Content error from cmsync-content
    #[error(transparent)]
    Content(#[from] cmsync_content::Error),

    /// CMS client error from cmsync-client
    #[error(transparent)]
    Cms(#[from] cmsync_client::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
