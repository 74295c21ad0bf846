//! Payload transformation
//!
//! Maps a parsed content file (plus, optionally, the existing CMS document)
//! into the API payload for its content type. The load-bearing rule is
//! preserve-if-absent, override-if-present: an MDX file that omits an
//! optional nested structure must never erase what the CMS already has, and
//! one that supplies it overwrites completely.

use chrono::Utc;
use serde_json::{Value, json};

use cmsync_client::{Document, Fields};
use cmsync_content::{ContentFile, render_html};

use crate::error::{Error, Result};
use crate::registry::{BodyFormat, Registry};

const HERO_TITLE: &str = "heroTitle";
const HERO_DESCRIPTION: &str = "heroDescription";

/// Build the CMS payload for `file` under the content type named by `key`.
///
/// Every sync that touches a document stamps a fresh publish time; last
/// writer wins.
///
/// # Errors
///
/// Returns an error if `key` is not a registered content type, or if the
/// frontmatter fails the content type's schema when re-validated here.
pub fn to_payload(
    registry: &Registry,
    key: &str,
    file: &ContentFile,
    existing: Option<&Document>,
) -> Result<Fields> {
    let spec = registry
        .get(key)
        .ok_or_else(|| Error::UnsupportedContentType {
            key: key.to_string(),
        })?;

    if let Some(schema) = &spec.schema {
        let errors = schema.check(file);
        if !errors.is_empty() {
            return Err(Error::InvalidFrontmatter {
                slug: file.slug.clone(),
                errors,
            });
        }
    }

    let title = file
        .field_str("title")
        .unwrap_or_else(|| file.slug.clone());

    let mut fields = Fields::new();
    fields.insert("title".to_string(), json!(title));
    fields.insert("slug".to_string(), json!(file.slug));
    fields.insert(
        "publishedAt".to_string(),
        json!(Utc::now().to_rfc3339()),
    );
    if let Some(description) = file.field_str("description") {
        fields.insert("description".to_string(), json!(description));
    }

    if let Some(hero) = hero_payload(file, &title, existing) {
        fields.insert("hero".to_string(), hero);
    }
    if let Some(content) = content_payload(spec.body, file, existing) {
        fields.insert("content".to_string(), content);
    }

    Ok(fields)
}

/// Hero section: built from frontmatter when any hero field is supplied
/// (title falling back to the document title), otherwise carried over from
/// the existing document.
fn hero_payload(file: &ContentFile, title: &str, existing: Option<&Document>) -> Option<Value> {
    let hero_title = file.field_str(HERO_TITLE);
    let hero_description = file.field_str(HERO_DESCRIPTION);

    if hero_title.is_some() || hero_description.is_some() {
        let mut hero = serde_json::Map::new();
        hero.insert(
            "title".to_string(),
            json!(hero_title.unwrap_or_else(|| title.to_string())),
        );
        if let Some(description) = hero_description {
            hero.insert("description".to_string(), json!(description));
        }
        return Some(Value::Object(hero));
    }

    existing.and_then(|doc| doc.field("hero")).cloned()
}

/// Body content: one component-tagged block when the body is non-blank,
/// otherwise the existing document's blocks unchanged.
fn content_payload(
    body_format: BodyFormat,
    file: &ContentFile,
    existing: Option<&Document>,
) -> Option<Value> {
    if !file.body.trim().is_empty() {
        let block = match body_format {
            BodyFormat::Markdown => json!({ "block": "body", "markdown": file.body }),
            BodyFormat::Html => json!({ "block": "body", "html": render_html(&file.body) }),
        };
        return Some(json!([block]));
    }

    existing.and_then(|doc| doc.field("content")).cloned()
}
