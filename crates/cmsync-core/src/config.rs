//! Manifest parsing for cmsync.toml
//!
//! The manifest declares the CMS connection and the content-type registry.
//! Credentials never live in the manifest; it names the environment variable
//! holding the API token instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::Result;
use crate::registry::BodyFormat;

fn default_token_env() -> String {
    "CMSYNC_CMS_TOKEN".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

/// CMS connection section
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CmsSection {
    /// Base URL of the CMS API
    pub base_url: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Canonical locale; its files live directly under each content type's
    /// base directory
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

/// One content type's registry entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentTypeSection {
    /// On-disk base directory, relative to the manifest's directory
    pub dir: String,

    /// CMS collection id this content type syncs into
    pub cms_type_id: String,

    /// How the MDX body is stored in the CMS
    #[serde(default)]
    pub body: BodyFormat,

    /// Opt-in frontmatter schema name
    #[serde(default)]
    pub schema: Option<String>,
}

/// Configuration manifest parsed from cmsync.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub cms: CmsSection,

    /// Content types keyed by name; synced in key order
    #[serde(default)]
    pub content_types: BTreeMap<String, ContentTypeSection>,
}

impl Manifest {
    /// Parse a manifest from TOML content.
    ///
    /// # Example
    ///
    /// ```
    /// use cmsync_core::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [cms]
    /// base-url = "https://cms.example.org"
    ///
    /// [content-types.blog]
    /// dir = "content/blog"
    /// cms-type-id = "posts"
    /// body = "html"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.cms.default_locale, "en");
    /// assert_eq!(manifest.content_types["blog"].cms_type_id, "posts");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
