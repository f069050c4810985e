// src/api/downloader.rs
//! Sequential staging of page artifacts from the remote source.
//!
//! Walks the page tree in document order and writes each page's bytes
//! to the staging directory, sections included — a section's own
//! landing document is what the projector later copies as its index
//! page. One page's failure is logged and skipped; the walk continues.

use std::path::PathBuf;
use std::sync::Arc;

use super::PageSource;
use crate::error::AppError;
use crate::model::PageNode;
use crate::output::{paths, write_page_bytes};
use crate::types::PageId;

/// Stages page artifacts for a later projection pass.
pub struct PageDownloader {
    source: Arc<dyn PageSource>,
    staging_dir: PathBuf,
    artifact_ext: String,
}

impl PageDownloader {
    pub fn new(
        source: Arc<dyn PageSource>,
        staging_dir: impl Into<PathBuf>,
        artifact_ext: impl Into<String>,
    ) -> Self {
        Self {
            source,
            staging_dir: staging_dir.into(),
            artifact_ext: artifact_ext.into(),
        }
    }

    /// Fetches and stages every page of the given sibling trees, one at
    /// a time, in document order.
    ///
    /// Only creating the staging directory can fail here; fetching and
    /// writing are isolated per page.
    pub async fn stage_pages(&self, pages: &[PageNode]) -> Result<StagingReport, AppError> {
        std::fs::create_dir_all(&self.staging_dir)?;

        let mut report = StagingReport::new();
        for tree in pages {
            for page in tree.preorder() {
                log::info!("Downloading page '{}' (id {})", page.name(), page.id());
                match self.stage_page(page).await {
                    Ok(bytes) => report.record_staged(bytes),
                    Err(e) => {
                        log::error!(
                            "Failed to stage page '{}' (id {}): {}",
                            page.name(),
                            page.id(),
                            e
                        );
                        report.record_failed(FailedPage {
                            name: page.name().to_string(),
                            id: page.id().clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        log::info!(
            "Staging complete: {} staged, {} failed, {} bytes",
            report.pages_staged,
            report.failed.len(),
            report.bytes_staged
        );
        Ok(report)
    }

    /// Fetches one page and writes its staged artifact.
    async fn stage_page(&self, page: &PageNode) -> Result<usize, AppError> {
        let bytes = self.source.fetch_page(page.id()).await?;
        let staged =
            paths::staged_artifact_path(&self.staging_dir, page.source_ref(), &self.artifact_ext);
        write_page_bytes(&staged, &bytes)
    }
}

/// Outcome of a staging pass.
#[derive(Debug, Clone, Default)]
pub struct StagingReport {
    pub pages_staged: usize,
    pub bytes_staged: usize,
    pub failed: Vec<FailedPage>,
}

impl StagingReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_staged(&mut self, bytes: usize) {
        self.pages_staged += 1;
        self.bytes_staged += bytes;
    }

    pub fn record_failed(&mut self, page: FailedPage) {
        self.failed.push(page);
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A page whose fetch or staging write failed.
#[derive(Debug, Clone)]
pub struct FailedPage {
    pub name: String,
    pub id: PageId,
    pub reason: String,
}
