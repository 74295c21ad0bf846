//! CMS document model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content-type-specific fields of a document
pub type Fields = serde_json::Map<String, Value>;

/// One CMS document.
///
/// `id` is the opaque identity shared across all locale variants of a
/// logical document; it is minted by the CMS and only ever threaded through,
/// never constructed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub locale: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Content field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Read the `slug` out of a payload's fields, coercing scalars to text.
pub fn slug_of(fields: &Fields) -> Option<String> {
    match fields.get("slug") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
