//! Error types for cmsync-client

/// Result type for cmsync-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the CMS
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("{operation} failed with status {status}: {detail}")]
    Status {
        operation: String,
        status: u16,
        detail: String,
    },

    /// A localization was attached to a document id the CMS does not know
    #[error("Base document {document_id} not found in {type_id}")]
    BaseDocumentNotFound {
        type_id: String,
        document_id: String,
    },

    /// Malformed response body
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Operation-level failure reported by the backend
    #[error("CMS operation failed: {0}")]
    Operation(String),
}
