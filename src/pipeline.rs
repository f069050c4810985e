// src/pipeline.rs
//! Pipeline capability traits — abstract the three stages of a mirror
//! run.
//!
//! Each trait describes a single capability, enabling testing each
//! stage in isolation.

use crate::api::StagingReport;
use crate::error::AppError;
use crate::model::PageNode;
use crate::output::ProjectionReport;

/// Decodes the export manifest into the page tree.
pub trait ManifestSource {
    fn load_tree(&self) -> Result<PageNode, AppError>;
}

/// Fetches and stages page artifacts ahead of projection.
#[async_trait::async_trait]
pub trait ArtifactStaging {
    async fn stage(&self, root: &PageNode) -> Result<StagingReport, AppError>;
}

/// Projects the page tree onto the output directory.
pub trait TreeProjection {
    fn project(&self, root: &PageNode) -> Result<ProjectionReport, AppError>;
}
