//! Content discovery and frontmatter parsing for cmsync
//!
//! Provides the on-disk half of the reconciliation pipeline: walking a
//! content type's directory tree, parsing MDX frontmatter, deriving slugs
//! and locales, and validating frontmatter against per-type schemas.

pub mod error;
pub mod frontmatter;
pub mod locale;
pub mod markdown;
pub mod model;
pub mod scanner;
pub mod schema;
pub mod slug;

pub use error::{Error, Result};
pub use frontmatter::{Frontmatter, ParsedDocument, parse_document, scalar_to_string};
pub use locale::{base_locale, resolve_locale};
pub use markdown::render_html;
pub use model::{ContentFile, LINK_FIELD};
pub use scanner::Scanner;
pub use schema::{Schema, Validated, ValidationError, validate_files};
pub use slug::derive_slug;
