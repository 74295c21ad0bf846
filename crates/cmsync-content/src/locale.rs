//! Locale code resolution
//!
//! Locale codes may carry a region suffix (`es-419`); matching always
//! compares the base code before the first hyphen. Each file's locale is
//! resolved through one ordered fallback chain: an explicit frontmatter
//! `locale` field, else the containing locale directory's name, else the
//! configured default.

use crate::frontmatter::{Frontmatter, scalar_to_string};

/// Base locale code: everything before the first hyphen
pub fn base_locale(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Resolve a file's locale: frontmatter `locale` field, else the locale
/// directory name, else the default locale.
pub fn resolve_locale(
    frontmatter: &Frontmatter,
    directory: Option<&str>,
    default_locale: &str,
) -> String {
    if let Some(locale) = frontmatter.get("locale").and_then(scalar_to_string)
        && !locale.is_empty()
    {
        return locale;
    }
    match directory {
        Some(dir) => dir.to_string(),
        None => default_locale.to_string(),
    }
}
