//! SyncEngine implementation
//!
//! Reconciles one content type at a time: default-locale documents first,
//! then their matched locale variants, then orphan deletion, then a final
//! re-match attempt for locale files left unmatched. No error propagates
//! past the boundary of one file or one content type; the engine always
//! makes maximal progress and reports complete counters.

use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use cmsync_client::{CmsClient, Document, Fields};
use cmsync_content::{ContentFile, Scanner, base_locale, validate_files};

use crate::error::{Error, Result};
use crate::matcher::{ProcessedSlugs, find_matches};
use crate::registry::{ContentTypeSpec, Registry};
use crate::transform::to_payload;

use super::{ContentTypeOutcome, RunReport, SyncOptions, SyncResult};

/// Marker document id used for documents synthesized during a dry run, so
/// locale-variant preview logging has an id to reference
const DRY_RUN_DOC_ID: &str = "dry-run";

/// Engine for reconciling on-disk content with the CMS
pub struct SyncEngine<'a> {
    client: &'a dyn CmsClient,
    registry: &'a Registry,
    scanner: Scanner,
    default_locale: String,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        client: &'a dyn CmsClient,
        registry: &'a Registry,
        default_locale: impl Into<String>,
        options: SyncOptions,
    ) -> Self {
        let default_locale = default_locale.into();
        Self {
            client,
            registry,
            scanner: Scanner::new(default_locale.clone()),
            default_locale,
            options,
        }
    }

    /// Run the sync for every registered content type (or the named subset),
    /// in registry order.
    ///
    /// A content type whose sync fails outright is counted as one error and
    /// does not stop the remaining content types.
    ///
    /// # Errors
    ///
    /// Returns an error only when `filter` names an unregistered content
    /// type; sync-time failures are folded into the report instead.
    pub async fn sync(&self, filter: Option<&[String]>) -> Result<RunReport> {
        let specs: Vec<&ContentTypeSpec> = match filter {
            None => self.registry.types().iter().collect(),
            Some(keys) => keys
                .iter()
                .map(|key| {
                    self.registry
                        .get(key)
                        .ok_or_else(|| Error::UnsupportedContentType { key: key.clone() })
                })
                .collect::<Result<_>>()?,
        };

        // Locales in use anywhere on disk; computed across every content
        // type so that one type losing a locale directory doesn't hide that
        // locale's orphans for the others.
        let known_locales = self.scanner.locales_present(&self.registry.base_dirs());

        let mut report = RunReport::default();
        for spec in specs {
            let result = match self.sync_content_type(spec, &known_locales).await {
                Ok(result) => result,
                Err(e) => {
                    error!(content_type = %spec.key, error = %e, "content type sync failed");
                    SyncResult {
                        errors: 1,
                        ..Default::default()
                    }
                }
            };
            report.totals.absorb(&result);
            report.content_types.push(ContentTypeOutcome {
                key: spec.key.clone(),
                result,
            });
        }
        Ok(report)
    }

    /// Reconcile one content type.
    ///
    /// `known_locales` is the cross-content-type locale set from
    /// [`Scanner::locales_present`].
    pub async fn sync_content_type(
        &self,
        spec: &ContentTypeSpec,
        known_locales: &BTreeSet<String>,
    ) -> Result<SyncResult> {
        let mut result = SyncResult::default();
        let mut processed = ProcessedSlugs::new();

        info!(content_type = %spec.key, dry_run = self.options.dry_run, "syncing content type");

        let files = self.scanner.scan(&spec.dir);
        let validated = validate_files(spec.schema.as_ref(), files);

        // Invalid files are errors, but their slugs still count as present
        // on disk: a local edit that breaks validation must never get the
        // corresponding CMS document deleted as an orphan.
        for invalid in &validated.invalid {
            processed.add(&invalid.locale, &invalid.slug);
            result.errors += 1;
            error!(
                path = %invalid.path.display(),
                slug = %invalid.slug,
                diagnostics = ?invalid.errors,
                "invalid frontmatter, file skipped"
            );
        }

        let (variants, defaults): (Vec<ContentFile>, Vec<ContentFile>) = validated
            .valid
            .into_iter()
            .partition(|f| f.is_localization);

        for file in &defaults {
            processed.add(&file.locale, &file.slug);
            if let Err(e) = self
                .sync_default_file(spec, file, &variants, &mut processed, &mut result)
                .await
            {
                result.errors += 1;
                error!(slug = %file.slug, error = %e, "failed to sync document");
            }
        }

        // Orphan deletion runs before the unmatched-variant pass: a locale
        // file that matches nothing yet must not block cleanup, and deleting
        // first keeps a late match from reviving a document already gone.
        self.delete_orphans(spec, known_locales, &processed, &mut result)
            .await;

        self.reconcile_unmatched(spec, &variants, &mut processed, &mut result)
            .await;

        info!(
            content_type = %spec.key,
            created = result.created,
            updated = result.updated,
            deleted = result.deleted,
            errors = result.errors,
            "content type sync finished"
        );
        Ok(result)
    }

    /// Sync one default-locale file, then every locale variant matched to it.
    ///
    /// Errors from an individual variant are caught and counted here; an
    /// error from the default document itself propagates to the caller's
    /// per-file handler.
    async fn sync_default_file(
        &self,
        spec: &ContentTypeSpec,
        file: &ContentFile,
        variants: &[ContentFile],
        processed: &mut ProcessedSlugs,
        result: &mut SyncResult,
    ) -> Result<()> {
        let existing = self
            .client
            .find_by_slug(&spec.cms_type_id, &file.slug, Some(&self.default_locale))
            .await?;
        let payload = to_payload(self.registry, &spec.key, file, existing.as_ref())?;

        let document = match existing {
            Some(existing) => {
                let doc = self.gated_update_entry(spec, &existing, &payload).await?;
                result.updated += 1;
                doc
            }
            None => {
                let doc = self.gated_create_entry(spec, file, &payload).await?;
                result.created += 1;
                doc
            }
        };

        if document.id.is_empty() {
            return Ok(());
        }

        for matched in find_matches(file, variants, processed) {
            let locale_file = matched.locale_file;
            processed.add(&locale_file.locale, &locale_file.slug);
            debug!(reason = %matched.reason, "locale match");

            if let Err(e) = self
                .sync_variant(spec, locale_file, &document.id, result)
                .await
            {
                result.errors += 1;
                error!(
                    slug = %locale_file.slug,
                    locale = %locale_file.locale,
                    error = %e,
                    "failed to sync localization"
                );
            }
        }
        Ok(())
    }

    /// Create or update one localization anchored to `base_document_id`.
    async fn sync_variant(
        &self,
        spec: &ContentTypeSpec,
        file: &ContentFile,
        base_document_id: &str,
        result: &mut SyncResult,
    ) -> Result<()> {
        let existing = self
            .client
            .find_by_slug(&spec.cms_type_id, &file.slug, Some(&file.locale))
            .await?;
        let payload = to_payload(self.registry, &spec.key, file, existing.as_ref())?;

        match existing {
            Some(_) => {
                self.gated_update_localization(spec, base_document_id, file, &payload)
                    .await?;
                result.updated += 1;
            }
            None => {
                self.gated_create_localization(spec, base_document_id, file, &payload)
                    .await?;
                result.created += 1;
            }
        }
        Ok(())
    }

    /// Delete every CMS document with no corresponding on-disk file.
    ///
    /// Failures are caught per locale (listing) and per document (deletion)
    /// and never stop the pass.
    async fn delete_orphans(
        &self,
        spec: &ContentTypeSpec,
        known_locales: &BTreeSet<String>,
        processed: &ProcessedSlugs,
        result: &mut SyncResult,
    ) {
        for locale in known_locales {
            let docs = match self.client.get_all_entries(&spec.cms_type_id, locale).await {
                Ok(docs) => docs,
                Err(e) => {
                    result.errors += 1;
                    error!(locale = %locale, error = %e, "failed to list documents for orphan cleanup");
                    continue;
                }
            };

            for doc in docs {
                let doc_locale = if doc.locale.is_empty() {
                    locale.as_str()
                } else {
                    doc.locale.as_str()
                };
                if processed.contains(doc_locale, &doc.slug) {
                    continue;
                }

                match self.gated_delete(spec, &doc, doc_locale).await {
                    Ok(()) => result.deleted += 1,
                    Err(e) => {
                        result.errors += 1;
                        error!(
                            slug = %doc.slug,
                            locale = %doc_locale,
                            error = %e,
                            "failed to delete orphan"
                        );
                    }
                }
            }
        }
    }

    /// Final pass over locale files no default file claimed: re-query the
    /// CMS for a default-locale document matching the link field and sync
    /// against it when found.
    ///
    /// A miss is the expected steady state when a translation lands before
    /// its default-locale counterpart, or when the link field is stale.
    async fn reconcile_unmatched(
        &self,
        spec: &ContentTypeSpec,
        variants: &[ContentFile],
        processed: &mut ProcessedSlugs,
        result: &mut SyncResult,
    ) {
        for file in variants {
            if processed.contains(&file.locale, &file.slug) {
                continue;
            }
            let Some(link) = file.localizes.as_deref() else {
                warn!(path = %file.path.display(), "locale file has no link field, cannot match");
                continue;
            };

            match self
                .client
                .find_by_slug(&spec.cms_type_id, link, Some(&self.default_locale))
                .await
            {
                Ok(Some(base)) => {
                    processed.add(&file.locale, &file.slug);
                    if let Err(e) = self.sync_variant(spec, file, &base.id, result).await {
                        result.errors += 1;
                        error!(
                            slug = %file.slug,
                            locale = %file.locale,
                            error = %e,
                            "failed to sync late-matched localization"
                        );
                    }
                }
                Ok(None) => {
                    warn!(
                        slug = %file.slug,
                        locale = %file.locale,
                        link = %link,
                        "no default-locale document for link, leaving unmatched"
                    );
                }
                Err(e) => {
                    result.errors += 1;
                    error!(
                        slug = %file.slug,
                        locale = %file.locale,
                        link = %link,
                        error = %e,
                        "failed to look up link target"
                    );
                }
            }
        }
    }

    // One gated helper per mutating operation keeps the log-vs-call
    // decision in a single place each.

    async fn gated_create_entry(
        &self,
        spec: &ContentTypeSpec,
        file: &ContentFile,
        payload: &Fields,
    ) -> Result<Document> {
        if self.options.dry_run {
            info!(content_type = %spec.key, slug = %file.slug, "[dry-run] Would create document");
            return Ok(Document {
                id: DRY_RUN_DOC_ID.to_string(),
                slug: file.slug.clone(),
                locale: self.default_locale.clone(),
                fields: payload.clone(),
            });
        }
        info!(content_type = %spec.key, slug = %file.slug, "creating document");
        Ok(self
            .client
            .create_entry(&spec.cms_type_id, payload, Some(&self.default_locale))
            .await?)
    }

    async fn gated_update_entry(
        &self,
        spec: &ContentTypeSpec,
        existing: &Document,
        payload: &Fields,
    ) -> Result<Document> {
        if self.options.dry_run {
            info!(content_type = %spec.key, slug = %existing.slug, "[dry-run] Would update document");
            // Hand back the existing document untouched so locale matching
            // can still proceed against its id
            return Ok(existing.clone());
        }
        info!(content_type = %spec.key, slug = %existing.slug, "updating document");
        Ok(self
            .client
            .update_entry(
                &spec.cms_type_id,
                &existing.id,
                payload,
                Some(&self.default_locale),
            )
            .await?)
    }

    async fn gated_create_localization(
        &self,
        spec: &ContentTypeSpec,
        base_document_id: &str,
        file: &ContentFile,
        payload: &Fields,
    ) -> Result<()> {
        if self.options.dry_run {
            info!(
                content_type = %spec.key,
                slug = %file.slug,
                locale = %file.locale,
                base_id = %base_document_id,
                "[dry-run] Would create localization"
            );
            return Ok(());
        }
        info!(
            content_type = %spec.key,
            slug = %file.slug,
            locale = %file.locale,
            "creating localization"
        );
        self.client
            .create_localization(&spec.cms_type_id, base_document_id, &file.locale, payload)
            .await?;
        Ok(())
    }

    async fn gated_update_localization(
        &self,
        spec: &ContentTypeSpec,
        base_document_id: &str,
        file: &ContentFile,
        payload: &Fields,
    ) -> Result<()> {
        if self.options.dry_run {
            info!(
                content_type = %spec.key,
                slug = %file.slug,
                locale = %file.locale,
                "[dry-run] Would update localization"
            );
            return Ok(());
        }
        info!(
            content_type = %spec.key,
            slug = %file.slug,
            locale = %file.locale,
            "updating localization"
        );
        self.client
            .update_localization(&spec.cms_type_id, base_document_id, &file.locale, payload)
            .await?;
        Ok(())
    }

    async fn gated_delete(
        &self,
        spec: &ContentTypeSpec,
        doc: &Document,
        locale: &str,
    ) -> Result<()> {
        if self.options.dry_run {
            info!(
                content_type = %spec.key,
                slug = %doc.slug,
                locale = %locale,
                "[dry-run] Would delete orphaned document"
            );
            return Ok(());
        }
        info!(content_type = %spec.key, slug = %doc.slug, locale = %locale, "deleting orphaned document");
        if base_locale(locale) == base_locale(&self.default_locale) {
            self.client.delete_entry(&spec.cms_type_id, &doc.id).await?;
        } else {
            self.client
                .delete_localization(&spec.cms_type_id, &doc.id, locale)
                .await?;
        }
        Ok(())
    }
}
