//! In-memory CMS backend
//!
//! A deterministic stand-in for the HTTP client, used by the engine test
//! suites and available for offline experimentation. Records every mutating
//! call so callers can assert that dry runs touch nothing, and supports
//! per-slug failure injection to exercise fault isolation.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{CmsClient, LOCALE_ALL};
use crate::document::{Document, Fields, slug_of};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct State {
    docs: Vec<Entry>,
    next_id: u64,
    mutations: Vec<String>,
    fail_slugs: HashSet<String>,
}

#[derive(Debug, Clone)]
struct Entry {
    type_id: String,
    doc: Document,
}

/// In-memory [`CmsClient`] implementation
#[derive(Debug, Default)]
pub struct MemoryCms {
    state: Mutex<State>,
}

impl MemoryCms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document directly, bypassing the mutation log.
    pub async fn insert(&self, type_id: impl Into<String>, doc: Document) {
        let mut state = self.state.lock().await;
        state.docs.push(Entry {
            type_id: type_id.into(),
            doc,
        });
    }

    /// Every document currently stored for a content type, all locales.
    pub async fn documents(&self, type_id: &str) -> Vec<Document> {
        let state = self.state.lock().await;
        state
            .docs
            .iter()
            .filter(|e| e.type_id == type_id)
            .map(|e| e.doc.clone())
            .collect()
    }

    /// The mutating calls made so far, in order, one summary line each.
    pub async fn mutation_log(&self) -> Vec<String> {
        self.state.lock().await.mutations.clone()
    }

    /// Make every mutating operation touching `slug` fail.
    pub async fn fail_on_slug(&self, slug: impl Into<String>) {
        self.state.lock().await.fail_slugs.insert(slug.into());
    }

    fn check_injected(state: &State, slug: &str) -> Result<()> {
        if state.fail_slugs.contains(slug) {
            return Err(Error::Operation(format!("injected failure for slug {slug}")));
        }
        Ok(())
    }
}

#[async_trait]
impl CmsClient for MemoryCms {
    async fn get_all_entries(&self, type_id: &str, locale: &str) -> Result<Vec<Document>> {
        let state = self.state.lock().await;
        Ok(state
            .docs
            .iter()
            .filter(|e| e.type_id == type_id)
            .filter(|e| locale == LOCALE_ALL || e.doc.locale == locale)
            .map(|e| e.doc.clone())
            .collect())
    }

    async fn find_by_slug(
        &self,
        type_id: &str,
        slug: &str,
        locale: Option<&str>,
    ) -> Result<Option<Document>> {
        let state = self.state.lock().await;
        Ok(state
            .docs
            .iter()
            .filter(|e| e.type_id == type_id && e.doc.slug == slug)
            .find(|e| locale.is_none_or(|l| e.doc.locale == l))
            .map(|e| e.doc.clone()))
    }

    async fn create_entry(
        &self,
        type_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document> {
        let mut state = self.state.lock().await;
        let slug = slug_of(fields).unwrap_or_default();
        Self::check_injected(&state, &slug)?;

        state.next_id += 1;
        let doc = Document {
            id: format!("doc-{}", state.next_id),
            slug: slug.clone(),
            locale: locale.unwrap_or("en").to_string(),
            fields: fields.clone(),
        };
        state
            .mutations
            .push(format!("create_entry {type_id} {slug}"));
        state.docs.push(Entry {
            type_id: type_id.to_string(),
            doc: doc.clone(),
        });
        debug!(type_id, slug, id = %doc.id, "created in-memory document");
        Ok(doc)
    }

    async fn update_entry(
        &self,
        type_id: &str,
        document_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document> {
        let mut state = self.state.lock().await;
        let slug = slug_of(fields).unwrap_or_default();
        Self::check_injected(&state, &slug)?;

        let index = state
            .docs
            .iter()
            .position(|e| {
                e.type_id == type_id
                    && e.doc.id == document_id
                    && locale.is_none_or(|l| e.doc.locale == l)
            })
            .ok_or_else(|| Error::Operation(format!("document {document_id} not found")))?;

        state
            .mutations
            .push(format!("update_entry {type_id} {document_id}"));
        let entry = &mut state.docs[index];
        entry.doc.fields = fields.clone();
        if let Some(slug) = slug_of(fields) {
            entry.doc.slug = slug;
        }
        Ok(entry.doc.clone())
    }

    async fn create_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document> {
        let mut state = self.state.lock().await;
        let slug = slug_of(fields).unwrap_or_default();
        Self::check_injected(&state, &slug)?;

        if !state
            .docs
            .iter()
            .any(|e| e.type_id == type_id && e.doc.id == document_id)
        {
            return Err(Error::BaseDocumentNotFound {
                type_id: type_id.to_string(),
                document_id: document_id.to_string(),
            });
        }

        let doc = Document {
            id: document_id.to_string(),
            slug: slug.clone(),
            locale: locale.to_string(),
            fields: fields.clone(),
        };
        state
            .mutations
            .push(format!("create_localization {type_id} {document_id} {locale}"));
        state.docs.push(Entry {
            type_id: type_id.to_string(),
            doc: doc.clone(),
        });
        Ok(doc)
    }

    async fn update_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document> {
        let existing = match slug_of(fields) {
            Some(slug) => self.find_by_slug(type_id, &slug, Some(locale)).await?,
            None => None,
        };

        match existing {
            Some(doc) => {
                self.update_entry(type_id, &doc.id, fields, Some(locale))
                    .await
            }
            None => {
                self.create_localization(type_id, document_id, locale, fields)
                    .await
            }
        }
    }

    async fn delete_entry(&self, type_id: &str, document_id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let target_slugs: Vec<String> = state
            .docs
            .iter()
            .filter(|e| e.type_id == type_id && e.doc.id == document_id)
            .map(|e| e.doc.slug.clone())
            .collect();
        for slug in &target_slugs {
            Self::check_injected(&state, slug)?;
        }

        state
            .mutations
            .push(format!("delete_entry {type_id} {document_id}"));
        // Deleting a base document removes every locale variant with it
        state
            .docs
            .retain(|e| !(e.type_id == type_id && e.doc.id == document_id));
        Ok(())
    }

    async fn delete_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        let target_slugs: Vec<String> = state
            .docs
            .iter()
            .filter(|e| e.type_id == type_id && e.doc.id == document_id && e.doc.locale == locale)
            .map(|e| e.doc.slug.clone())
            .collect();
        for slug in &target_slugs {
            Self::check_injected(&state, slug)?;
        }

        state
            .mutations
            .push(format!("delete_localization {type_id} {document_id} {locale}"));
        state.docs.retain(|e| {
            !(e.type_id == type_id && e.doc.id == document_id && e.doc.locale == locale)
        });
        Ok(())
    }
}
