//! Sync orchestration
//!
//! The [`SyncEngine`] drives the end-to-end reconciliation between the
//! on-disk content tree and the CMS document store.

pub mod engine;

use serde::Serialize;

pub use engine::SyncEngine;

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, compute and report every intended mutation without
    /// performing any of them.
    pub dry_run: bool,
}

/// Accumulated outcome counters for a sync.
///
/// Counters are only ever incremented while a sync progresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub errors: u64,
}

impl SyncResult {
    /// Fold another result's counters into this one.
    pub fn absorb(&mut self, other: &SyncResult) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.errors += other.errors;
    }
}

/// One content type's counters within a run
#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeOutcome {
    pub key: String,
    #[serde(flatten)]
    pub result: SyncResult,
}

/// Report from a whole sync run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub content_types: Vec<ContentTypeOutcome>,
    pub totals: SyncResult,
}
