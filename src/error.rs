// src/error.rs
//! Application error types with structured error handling.
//!
//! The taxonomy follows the failure scopes of a mirror run: manifest
//! problems are fatal and abort before any output exists, while fetch,
//! staging and write failures are scoped to a single page and caught at
//! the page boundary by the downloader and the projector.

use crate::types::PageId;
use std::path::PathBuf;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// Fatal: the export manifest is missing, unparseable or violates
    /// the one-list/one-item structure. Nothing is written.
    #[error("Export manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Page-scoped: transport-level failure talking to the wiki.
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// Page-scoped: the export endpoint answered with a non-success status.
    #[error("Export endpoint returned {status} for page {id}: {body_preview}")]
    ExportService {
        id: PageId,
        status: reqwest::StatusCode,
        body_preview: String,
    },

    /// Page-scoped: a leaf's expected staged artifact is not on disk.
    #[error("Staged artifact missing for page '{name}' (expected {})", path.display())]
    StagedArtifactMissing { name: String, path: PathBuf },

    /// Page-scoped when raised during projection or staging; fatal when
    /// raised while preparing the staging or output roots.
    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Failures while reading or decoding the export manifest. Always fatal.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest at {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("manifest encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// The nested-list structure does not follow the export convention
    /// (exactly one top-level list, each list wrapping a single item).
    #[error("manifest structure violation: {0}")]
    Structure(String),

    /// A page reference the id-derivation scheme cannot decode. The
    /// export encodes the page id as a single `_`-delimited numeric
    /// suffix before the extension; anything else is refused rather
    /// than mirrored under a degraded identifier.
    #[error("malformed page reference '{href}': {reason}")]
    MalformedReference { href: String, reason: String },

    #[error("page entry has an empty title (href '{href}')")]
    EmptyTitle { href: String },
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
