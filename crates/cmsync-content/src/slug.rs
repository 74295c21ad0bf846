//! Slug derivation from frontmatter or filename

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::{Frontmatter, scalar_to_string};

/// Leading `YYYY-MM-DD-` date prefix on post filenames
static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap());

/// Derive the slug for a file: an explicit `slug` frontmatter field wins,
/// otherwise the file stem with any leading date prefix stripped.
pub fn derive_slug(frontmatter: &Frontmatter, file_stem: &str) -> String {
    if let Some(slug) = frontmatter.get("slug").and_then(scalar_to_string)
        && !slug.is_empty()
    {
        return slug;
    }
    DATE_PREFIX.replace(file_stem, "").to_string()
}
