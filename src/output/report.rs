// src/output/report.rs
//! Outcome of a projection pass.
//!
//! The projector records every written and skipped page here; the run
//! summary printed at completion is read off this report.

use crate::types::PageId;
use std::path::PathBuf;

/// Result of projecting a page tree onto the output directory.
#[derive(Debug, Clone, Default)]
pub struct ProjectionReport {
    /// Pages whose content reached the output tree
    pub written: Vec<WrittenPage>,
    /// Pages skipped by per-leaf failure isolation
    pub skipped: Vec<SkippedPage>,
    /// Aggregate statistics
    pub stats: ProjectionStats,
}

impl ProjectionReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a page written to the output tree.
    pub fn record_written(&mut self, page: WrittenPage) {
        self.stats.pages_written += 1;
        self.stats.bytes_written += page.bytes;
        self.written.push(page);
    }

    /// Records a page skipped by failure isolation.
    pub fn record_skipped(&mut self, page: SkippedPage) {
        self.stats.pages_skipped += 1;
        self.skipped.push(page);
    }

    /// Checks if every page reached the output tree.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A page successfully written to the output tree.
#[derive(Debug, Clone)]
pub struct WrittenPage {
    pub name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A page skipped after a page-scoped failure.
#[derive(Debug, Clone)]
pub struct SkippedPage {
    pub name: String,
    pub id: PageId,
    pub reason: String,
}

/// Aggregate projection statistics.
#[derive(Debug, Clone, Default)]
pub struct ProjectionStats {
    pub pages_written: usize,
    pub pages_skipped: usize,
    pub bytes_written: usize,
}
