//! On-disk content record

use std::path::PathBuf;

use crate::frontmatter::Frontmatter;

/// Frontmatter field linking a localized file to the default-locale slug it
/// translates
pub const LINK_FIELD: &str = "localizes";

/// One parsed on-disk MDX file, annotated with locale and link metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFile {
    /// Absolute path of the file; identity within a scan, never persisted
    pub path: PathBuf,
    /// Slug from frontmatter, else derived from the filename
    pub slug: String,
    /// Resolved locale code, possibly region-qualified (`es-419`)
    pub locale: String,
    /// True for files discovered under a non-default-locale directory
    pub is_localization: bool,
    /// Slug of the default-locale file this one translates, if declared
    pub localizes: Option<String>,
    /// Raw frontmatter fields
    pub frontmatter: Frontmatter,
    /// Trimmed content after the frontmatter block
    pub body: String,
}

impl ContentFile {
    /// Frontmatter field as text, with numeric scalars coerced
    pub fn field_str(&self, name: &str) -> Option<String> {
        self.frontmatter
            .get(name)
            .and_then(crate::frontmatter::scalar_to_string)
    }
}
