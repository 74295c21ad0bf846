//! CMS document API client for cmsync
//!
//! Defines the [`CmsClient`] capability set the sync engine consumes, a
//! reqwest-backed HTTP implementation, and an in-memory implementation for
//! tests and offline runs. Any conforming implementation is substitutable.

pub mod client;
pub mod document;
pub mod error;
pub mod http;
pub mod memory;

pub use client::{CmsClient, LOCALE_ALL};
pub use document::{Document, Fields, slug_of};
pub use error::{Error, Result};
pub use http::{HttpCmsClient, SYNC_ORIGIN_HEADER, SYNC_ORIGIN_VALUE};
pub use memory::MemoryCms;
