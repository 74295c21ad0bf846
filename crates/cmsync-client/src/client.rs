//! The CMS capability set consumed by the sync engine

use async_trait::async_trait;

use crate::document::{Document, Fields};
use crate::error::Result;

/// Locale filter value meaning "every locale's documents"
pub const LOCALE_ALL: &str = "all";

/// Abstract CMS document store.
///
/// Every operation maps to one logical CMS API call. Listing operations
/// follow pagination to exhaustion. Implementations must mark every write
/// as sync-originated so CMS-side export hooks can suppress feedback loops.
#[async_trait]
pub trait CmsClient: Send + Sync {
    /// Every document of a content type in one locale ([`LOCALE_ALL`] for
    /// all locales).
    async fn get_all_entries(&self, type_id: &str, locale: &str) -> Result<Vec<Document>>;

    /// Look up one document by slug, optionally locale-filtered.
    async fn find_by_slug(
        &self,
        type_id: &str,
        slug: &str,
        locale: Option<&str>,
    ) -> Result<Option<Document>>;

    /// Create a new document.
    async fn create_entry(
        &self,
        type_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document>;

    /// Overwrite an existing document's fields.
    async fn update_entry(
        &self,
        type_id: &str,
        document_id: &str,
        fields: &Fields,
        locale: Option<&str>,
    ) -> Result<Document>;

    /// Attach a new locale variant to an existing document id.
    ///
    /// Fails loudly when the base document cannot be found.
    async fn create_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document>;

    /// Update the localization found by slug+locale, delegating to
    /// [`create_localization`](Self::create_localization) when none exists.
    async fn update_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
        fields: &Fields,
    ) -> Result<Document>;

    /// Delete a document (all locale variants).
    async fn delete_entry(&self, type_id: &str, document_id: &str) -> Result<()>;

    /// Delete one locale variant of a document.
    async fn delete_localization(
        &self,
        type_id: &str,
        document_id: &str,
        locale: &str,
    ) -> Result<()>;
}
