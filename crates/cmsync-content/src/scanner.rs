//! On-disk content discovery
//!
//! Walks one content type's directory tree and produces parsed
//! [`ContentFile`] records. Discovery is best-effort: unreadable entries are
//! logged and skipped so one broken file never hides the rest of the tree.
//!
//! Layout convention: default-locale files live directly under the content
//! type's base directory; locale variants live under a like-named directory
//! inside a sibling locale directory:
//!
//! ```text
//! content/
//!   blog/              <- base directory (default locale)
//!     about.mdx
//!   es/
//!     blog/            <- locale variant root for "es"
//!       sobre.mdx
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::frontmatter::{parse_document, scalar_to_string};
use crate::locale::{base_locale, resolve_locale};
use crate::model::{ContentFile, LINK_FIELD};
use crate::slug::derive_slug;

/// Recognized content file extension
const EXTENSION: &str = "mdx";

/// Discovers and parses content files for one content type at a time
#[derive(Debug, Clone)]
pub struct Scanner {
    default_locale: String,
}

impl Scanner {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
        }
    }

    /// Scan one content type's tree.
    ///
    /// Reads the base directory non-recursively for default-locale files,
    /// then every sibling locale directory containing a like-named
    /// subdirectory for locale variants. A missing base directory yields an
    /// empty list.
    pub fn scan(&self, base_dir: &Path) -> Vec<ContentFile> {
        let mut files = self.scan_dir(base_dir, None);

        for (locale_name, variant_root) in self.locale_variant_roots(base_dir) {
            files.extend(self.scan_dir(&variant_root, Some(locale_name.as_str())));
        }

        files
    }

    /// Union of every locale observed across the given base directories
    /// (base codes only), plus the default locale.
    ///
    /// Orphan cleanup consults this set so that removing one content type's
    /// locale directory does not hide that locale for the others.
    pub fn locales_present(&self, base_dirs: &[PathBuf]) -> BTreeSet<String> {
        let mut locales = BTreeSet::new();
        locales.insert(base_locale(&self.default_locale).to_string());

        for base_dir in base_dirs {
            for (locale_name, _) in self.locale_variant_roots(base_dir) {
                locales.insert(base_locale(&locale_name).to_string());
            }
        }

        locales
    }

    /// Sibling directories of `base_dir` that contain a like-named
    /// subdirectory, as (locale name, variant root) pairs in name order.
    fn locale_variant_roots(&self, base_dir: &Path) -> Vec<(String, PathBuf)> {
        let Some(parent) = base_dir.parent() else {
            return Vec::new();
        };
        let Some(base_name) = base_dir.file_name() else {
            return Vec::new();
        };

        let entries = match fs::read_dir(parent) {
            Ok(entries) => entries,
            Err(e) => {
                if parent.exists() {
                    warn!(path = %parent.display(), error = %e, "skipping unreadable content parent");
                }
                return Vec::new();
            }
        };

        let mut roots = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if !path.is_dir() || entry.file_name() == base_name {
                continue;
            }
            let variant_root = path.join(base_name);
            if variant_root.is_dir() {
                roots.push((entry.file_name().to_string_lossy().into_owned(), variant_root));
            }
        }

        // Deterministic discovery order
        roots.sort_by(|a, b| a.0.cmp(&b.0));
        roots
    }

    /// Read every content file directly inside `dir`.
    ///
    /// `locale_dir` is the name of the containing locale directory, `None`
    /// for the default-locale base directory.
    fn scan_dir(&self, dir: &Path, locale_dir: Option<&str>) -> Vec<ContentFile> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                if dir.exists() {
                    warn!(path = %dir.display(), error = %e, "skipping unreadable content directory");
                } else {
                    debug!(path = %dir.display(), "content directory absent, nothing to scan");
                }
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
            })
            .collect();
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match self.read_file(&path, locale_dir) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unparseable content file");
                }
            }
        }
        files
    }

    fn read_file(&self, path: &Path, locale_dir: Option<&str>) -> crate::Result<ContentFile> {
        let source = fs::read_to_string(path).map_err(|e| crate::Error::io(path, e))?;
        let parsed = parse_document(&source)?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let slug = derive_slug(&parsed.frontmatter, &stem);
        let locale = resolve_locale(&parsed.frontmatter, locale_dir, &self.default_locale);
        let localizes = parsed
            .frontmatter
            .get(LINK_FIELD)
            .and_then(scalar_to_string)
            .filter(|s| !s.is_empty());

        debug!(path = %path.display(), slug = %slug, locale = %locale, "discovered content file");

        Ok(ContentFile {
            path: path.to_path_buf(),
            slug,
            locale,
            is_localization: locale_dir.is_some(),
            localizes,
            frontmatter: parsed.frontmatter,
            body: parsed.body,
        })
    }
}
