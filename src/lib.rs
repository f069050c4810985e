// src/lib.rs
//! confmirror library — mirrors a Confluence space HTML export into a
//! directory tree of per-page Word documents.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ManifestError`, `ValidationError`
//! - **Configuration** — `MirrorConfig`, `CommandLineInput`
//! - **Domain model** — `PageNode`
//! - **Domain types** — `PageId`, `SourceRef`, `SessionCookie`, `BaseUrl`
//! - **Manifest decoding** — `parse_export_index`, `derive_page_id`
//! - **API client** — `PageSource`, `ExportHttpClient`, `PageDownloader`
//! - **Projection** — `Projector`, `ProjectionReport`, path helpers

// Internal modules — must match what's in main.rs
mod api;
mod config;
mod constants;
mod error;
mod manifest;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ManifestError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, FetchConfig, MirrorConfig};

// --- Domain Model ---
pub use crate::model::PageNode;

// --- Domain Types ---
pub use crate::types::{BaseUrl, PageId, SessionCookie, SourceRef};

// --- Manifest Decoding ---
pub use crate::manifest::{derive_page_id, parse_export_index};

// --- API Client ---
pub use crate::api::{ExportHttpClient, FailedPage, PageDownloader, PageSource, StagingReport};

// --- Projection ---
pub use crate::output::{
    paths, read_staged, reset_output_root, write_page_bytes, ProjectionReport, ProjectionStats,
    Projector, SkippedPage, WrittenPage,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{ArtifactStaging, ManifestSource, TreeProjection};
