// src/api/mod.rs
//! Remote page retrieval — the ability to fetch a page's exported
//! rendition from the wiki.
//!
//! Business logic depends on the [`PageSource`] trait, never on HTTP
//! details; runs that work purely from pre-staged artifacts never
//! construct a client at all.

mod client;
mod downloader;

use crate::error::AppError;
use crate::types::PageId;

/// The ability to retrieve a page's exported binary content by id.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, id: &PageId) -> Result<Vec<u8>, AppError>;
}

pub use client::ExportHttpClient;
pub use downloader::{FailedPage, PageDownloader, StagingReport};
