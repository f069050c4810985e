// src/output/projector.rs
//! Recursive projection of the page tree onto the output directory.
//!
//! Leaves copy their staged artifact to `{base}/{name}.{ext}`; sections
//! recurse into their index-page sequence under `{base}/{name}`. Every
//! page-scoped failure is caught here, logged with the page identity
//! and recorded in the report; a single broken page never aborts the
//! rest of the export.

use std::path::{Path, PathBuf};

use super::paths;
use super::report::{ProjectionReport, SkippedPage, WrittenPage};
use super::writer;
use crate::error::AppError;
use crate::model::PageNode;

/// Projects a page tree onto a directory hierarchy.
#[derive(Debug, Clone)]
pub struct Projector {
    staging_dir: PathBuf,
    output_root: PathBuf,
    artifact_ext: String,
}

impl Projector {
    pub fn new(
        staging_dir: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        artifact_ext: impl Into<String>,
    ) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            output_root: output_root.into(),
            artifact_ext: artifact_ext.into(),
        }
    }

    /// Projects `pages` (a sibling sequence, usually the root's
    /// children) into a freshly reset output root.
    ///
    /// Only preparing the output root can fail here; everything past
    /// that point is isolated per page.
    pub fn project(&self, pages: &[PageNode]) -> Result<ProjectionReport, AppError> {
        writer::reset_output_root(&self.output_root)?;

        let mut report = ProjectionReport::new();
        self.project_level(pages, &self.output_root, 0, &mut report);

        log::info!(
            "Projection complete: {} written, {} skipped, {} bytes",
            report.stats.pages_written,
            report.stats.pages_skipped,
            report.stats.bytes_written
        );
        Ok(report)
    }

    /// Projects one sibling sequence, in order, under `base`.
    fn project_level(
        &self,
        pages: &[PageNode],
        base: &Path,
        depth: usize,
        report: &mut ProjectionReport,
    ) {
        log::debug!(
            "Projecting {} pages into {} (depth {})",
            pages.len(),
            base.display(),
            depth
        );

        for page in pages {
            match page {
                PageNode::Leaf { .. } => match self.project_leaf(page, base) {
                    Ok(written) => {
                        log::info!("Wrote page '{}' to {}", written.name, written.path.display());
                        report.record_written(written);
                    }
                    Err(e) => {
                        log::error!("Skipping page '{}' (id {}): {}", page.name(), page.id(), e);
                        report.record_skipped(SkippedPage {
                            name: page.name().to_string(),
                            id: page.id().clone(),
                            reason: e.to_string(),
                        });
                    }
                },
                PageNode::Section { name, .. } => {
                    let section_dir = base.join(paths::sanitize_segment(name));
                    self.project_level(&page.with_index_page(), &section_dir, depth + 1, report);
                }
            }
        }
    }

    /// Copies one leaf's staged artifact into the output tree.
    fn project_leaf(&self, page: &PageNode, base: &Path) -> Result<WrittenPage, AppError> {
        let staged =
            paths::staged_artifact_path(&self.staging_dir, page.source_ref(), &self.artifact_ext);
        let bytes = writer::read_staged(&staged, page.name())?;

        let destination = paths::leaf_destination(base, page.name(), &self.artifact_ext);
        let written = writer::write_page_bytes(&destination, &bytes)?;

        Ok(WrittenPage {
            name: page.name().to_string(),
            path: destination,
            bytes: written,
        })
    }
}
