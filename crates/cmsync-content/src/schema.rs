//! Frontmatter schema validation
//!
//! Schema coverage is opt-in per content type: types without a registered
//! schema pass every file through unvalidated. Validation runs against the
//! frontmatter with the derived slug injected, so filename-derived slugs are
//! covered even when absent from the raw frontmatter.

use std::path::PathBuf;

use serde_json::Value;

use crate::frontmatter::scalar_to_string;
use crate::model::ContentFile;

/// A frontmatter schema: required scalar fields that must be present and
/// non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    required: Vec<&'static str>,
}

impl Schema {
    /// Look up a builtin schema by name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Self {
                required: vec!["title", "slug"],
            }),
            "post" => Some(Self {
                required: vec!["title", "slug", "description"],
            }),
            _ => None,
        }
    }

    /// Validate a file's frontmatter (with slug injected).
    ///
    /// Returns one `field: message` diagnostic per violation; empty means
    /// the file is valid.
    pub fn check(&self, file: &ContentFile) -> Vec<String> {
        let mut errors = Vec::new();
        for field in &self.required {
            let value = if *field == "slug" {
                Some(Value::String(file.slug.clone()))
            } else {
                file.frontmatter.get(*field).cloned()
            };

            match value {
                None | Some(Value::Null) => {
                    errors.push(format!("{field}: required field is missing"));
                }
                Some(value) => match scalar_to_string(&value) {
                    Some(s) if s.trim().is_empty() => {
                        errors.push(format!("{field}: must not be empty"));
                    }
                    Some(_) => {}
                    None => {
                        errors.push(format!("{field}: expected a scalar value"));
                    }
                },
            }
        }
        errors
    }
}

/// Structured diagnostics for one invalid file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: PathBuf,
    pub slug: String,
    pub locale: String,
    pub errors: Vec<String>,
}

/// The outcome of validating a scanned file set
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub valid: Vec<ContentFile>,
    pub invalid: Vec<ValidationError>,
}

/// Partition scanned files into valid and invalid sets.
///
/// With no schema, every file is valid.
pub fn validate_files(schema: Option<&Schema>, files: Vec<ContentFile>) -> Validated {
    let Some(schema) = schema else {
        return Validated {
            valid: files,
            invalid: Vec::new(),
        };
    };

    let mut validated = Validated::default();
    for file in files {
        let errors = schema.check(&file);
        if errors.is_empty() {
            validated.valid.push(file);
        } else {
            validated.invalid.push(ValidationError {
                path: file.path.clone(),
                slug: file.slug.clone(),
                locale: file.locale.clone(),
                errors,
            });
        }
    }
    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;
    use serde_json::json;

    fn file_with(fields: &[(&str, Value)], slug: &str) -> ContentFile {
        let mut frontmatter = Frontmatter::new();
        for (k, v) in fields {
            frontmatter.insert((*k).to_string(), v.clone());
        }
        ContentFile {
            path: PathBuf::from(format!("/content/{slug}.mdx")),
            slug: slug.to_string(),
            locale: "en".to_string(),
            is_localization: false,
            localizes: None,
            frontmatter,
            body: String::new(),
        }
    }

    #[test]
    fn test_named_schemas() {
        assert!(Schema::named("page").is_some());
        assert!(Schema::named("post").is_some());
        assert!(Schema::named("unknown").is_none());
    }

    #[test]
    fn test_missing_title_is_field_prefixed() {
        let schema = Schema::named("page").unwrap();
        let file = file_with(&[], "about");
        let errors = schema.check(&file);
        assert_eq!(errors, vec!["title: required field is missing"]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let schema = Schema::named("page").unwrap();
        let file = file_with(&[("title", json!("  "))], "about");
        assert_eq!(schema.check(&file), vec!["title: must not be empty"]);
    }

    #[test]
    fn test_injected_slug_satisfies_requirement() {
        // Slug derived from the filename, absent from raw frontmatter
        let schema = Schema::named("page").unwrap();
        let file = file_with(&[("title", json!("About"))], "about");
        assert!(schema.check(&file).is_empty());
    }

    #[test]
    fn test_no_schema_passes_everything() {
        let files = vec![file_with(&[], "anything")];
        let validated = validate_files(None, files);
        assert_eq!(validated.valid.len(), 1);
        assert!(validated.invalid.is_empty());
    }

    #[test]
    fn test_partition_keeps_diagnostics() {
        let schema = Schema::named("page").unwrap();
        let files = vec![
            file_with(&[("title", json!("Good"))], "good"),
            file_with(&[], "bad"),
        ];
        let validated = validate_files(Some(&schema), files);
        assert_eq!(validated.valid.len(), 1);
        assert_eq!(validated.invalid.len(), 1);
        assert_eq!(validated.invalid[0].slug, "bad");
        assert_eq!(validated.invalid[0].locale, "en");
    }

    #[test]
    fn test_non_scalar_field_rejected() {
        let schema = Schema::named("page").unwrap();
        let file = file_with(&[("title", json!(["a", "b"]))], "about");
        assert_eq!(schema.check(&file), vec!["title: expected a scalar value"]);
    }
}
