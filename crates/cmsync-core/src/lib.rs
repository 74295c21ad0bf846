//! Reconciliation engine for cmsync
//!
//! Coordinates the on-disk content crates and the CMS client into the
//! end-to-end sync: scan, validate, match locales, transform payloads, and
//! reconcile create/update/delete decisions per (content type, locale, slug).
//!
//! # Architecture
//!
//! ```text
//!                 CLI
//!                  |
//!             cmsync-core
//!                  |
//!        +---------+---------+
//!        |                   |
//! cmsync-content       cmsync-client
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod sync;
pub mod transform;

pub use config::{CmsSection, Manifest};
pub use error::{Error, Result};
pub use matcher::{LocaleMatch, ProcessedSlugs, find_matches};
pub use registry::{BodyFormat, ContentTypeSpec, Registry};
pub use sync::{ContentTypeOutcome, RunReport, SyncEngine, SyncOptions, SyncResult};
pub use transform::to_payload;
