//! Frontmatter fence splitting and YAML parsing
//!
//! An MDX document opens with an optional `---` fenced YAML block. Parsing
//! yields the frontmatter as a flat map of field name to JSON scalar (YAML
//! numbers and booleans keep their types) plus the trimmed body after the
//! closing fence. A document without a fence is all body.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Frontmatter fields keyed by name
pub type Frontmatter = BTreeMap<String, Value>;

/// A parsed MDX document: frontmatter plus trimmed body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

const FENCE: &str = "---";

/// Parse an MDX source string into frontmatter and body.
///
/// # Errors
///
/// Returns an error if the opening fence is never closed, the YAML block
/// fails to parse, or the block is not a mapping.
pub fn parse_document(source: &str) -> Result<ParsedDocument> {
    let Some(rest) = strip_opening_fence(source) else {
        return Ok(ParsedDocument {
            frontmatter: Frontmatter::new(),
            body: source.trim().to_string(),
        });
    };

    let Some((yaml, body)) = split_closing_fence(rest) else {
        return Err(Error::UnterminatedFrontmatter);
    };

    Ok(ParsedDocument {
        frontmatter: parse_yaml_block(yaml)?,
        body: body.trim().to_string(),
    })
}

/// Render a frontmatter scalar as a string.
///
/// YAML scalars like `slug: 404` parse as numbers; callers that need the
/// field as text (slug, locale, link field) go through here.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn strip_opening_fence(source: &str) -> Option<&str> {
    let trimmed = source.trim_start_matches('\u{feff}');
    let rest = trimmed.strip_prefix(FENCE)?;
    // The fence must be the whole first line
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    Some(rest)
}

fn split_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml_block(yaml: &str) -> Result<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let mapping = match value {
        serde_yaml::Value::Mapping(m) => m,
        serde_yaml::Value::Null => return Ok(Frontmatter::new()),
        other => {
            return Err(Error::FrontmatterNotMapping {
                found: yaml_kind(&other).to_string(),
            });
        }
    };

    let mut frontmatter = Frontmatter::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str().map(str::to_string) else {
            continue;
        };
        let value = serde_json::to_value(&value)?;
        frontmatter.insert(key, value);
    }
    Ok(frontmatter)
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
