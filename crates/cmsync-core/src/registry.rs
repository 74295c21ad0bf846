//! Content type registry
//!
//! Maps each configured content-type key to its on-disk directory, CMS
//! collection id, body storage format, and optional frontmatter schema.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use cmsync_content::Schema;

use crate::config::Manifest;
use crate::error::{Error, Result};

/// How a content type's MDX body is stored in the CMS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    /// Body block carries the raw markdown
    #[default]
    Markdown,
    /// Body block carries pre-rendered HTML
    Html,
}

/// One registered content type
#[derive(Debug, Clone)]
pub struct ContentTypeSpec {
    pub key: String,
    /// Default-locale base directory, resolved against the project root
    pub dir: PathBuf,
    pub cms_type_id: String,
    pub body: BodyFormat,
    pub schema: Option<Schema>,
}

/// All registered content types, in sync order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: Vec<ContentTypeSpec>,
}

impl Registry {
    /// Build the registry from a parsed manifest, resolving content
    /// directories against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if a content type names an unknown schema.
    pub fn from_manifest(manifest: &Manifest, root: &Path) -> Result<Self> {
        let mut types = Vec::with_capacity(manifest.content_types.len());
        for (key, section) in &manifest.content_types {
            let schema = match &section.schema {
                Some(name) => Some(Schema::named(name).ok_or_else(|| Error::UnknownSchema {
                    key: key.clone(),
                    name: name.clone(),
                })?),
                None => None,
            };
            types.push(ContentTypeSpec {
                key: key.clone(),
                dir: root.join(&section.dir),
                cms_type_id: section.cms_type_id.clone(),
                body: section.body,
                schema,
            });
        }
        Ok(Self { types })
    }

    pub fn types(&self) -> &[ContentTypeSpec] {
        &self.types
    }

    pub fn get(&self, key: &str) -> Option<&ContentTypeSpec> {
        self.types.iter().find(|t| t.key == key)
    }

    /// Every content type's base directory; input to locale discovery.
    pub fn base_dirs(&self) -> Vec<PathBuf> {
        self.types.iter().map(|t| t.dir.clone()).collect()
    }

    #[cfg(test)]
    pub(crate) fn from_specs(types: Vec<ContentTypeSpec>) -> Self {
        Self { types }
    }
}
