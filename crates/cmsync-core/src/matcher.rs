//! Locale matching
//!
//! Pairs each default-locale file with its locale-variant files via the
//! declared link field. Matching is a pure function over its inputs; the
//! shared record of already-consumed (locale, slug) pairs is an explicit
//! value the orchestrator threads through every phase.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use cmsync_content::{ContentFile, base_locale};

/// Running record of (base locale, slug) pairs that have an on-disk file and
/// must not be treated as orphans or matched twice
#[derive(Debug, Clone, Default)]
pub struct ProcessedSlugs {
    map: HashMap<String, HashSet<String>>,
}

impl ProcessedSlugs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a slug as processed for a locale (keyed by base code).
    pub fn add(&mut self, locale: &str, slug: &str) {
        self.map
            .entry(base_locale(locale).to_string())
            .or_default()
            .insert(slug.to_string());
    }

    pub fn contains(&self, locale: &str, slug: &str) -> bool {
        self.map
            .get(base_locale(locale))
            .is_some_and(|slugs| slugs.contains(slug))
    }
}

/// A resolved (default file, locale variant) pairing
#[derive(Debug, Clone)]
pub struct LocaleMatch<'a> {
    pub default_file: &'a ContentFile,
    pub locale_file: &'a ContentFile,
    /// Why the match fired; for logs only
    pub reason: String,
}

/// Match locale-variant candidates against one default-locale file.
///
/// Candidates already recorded in `processed` are skipped. A candidate
/// matches when its link field equals the default file's current slug
/// exactly. At most one match per base locale survives: the first candidate
/// in discovery order wins and later claimants are dropped with a
/// diagnostic.
pub fn find_matches<'a>(
    default_file: &'a ContentFile,
    candidates: &'a [ContentFile],
    processed: &ProcessedSlugs,
) -> Vec<LocaleMatch<'a>> {
    let mut matched_locales: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();

    for candidate in candidates {
        if processed.contains(&candidate.locale, &candidate.slug) {
            continue;
        }
        if candidate.localizes.as_deref() != Some(default_file.slug.as_str()) {
            continue;
        }

        let base = base_locale(&candidate.locale);
        if !matched_locales.insert(base) {
            warn!(
                locale = base,
                dropped = %candidate.path.display(),
                link = %default_file.slug,
                "duplicate locale claim for link, keeping first"
            );
            continue;
        }

        matches.push(LocaleMatch {
            default_file,
            locale_file: candidate,
            reason: format!(
                "{} localizes {} ({})",
                candidate.slug, default_file.slug, candidate.locale
            ),
        });
    }

    matches
}
