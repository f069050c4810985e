// src/output/writer.rs
//! Filesystem wrappers for the projection and staging passes.
//!
//! This module is the only place where file I/O occurs, keeping the
//! rest of the output layer pure and testable.

use crate::error::AppError;
use std::fs;
use std::path::Path;

/// Removes any previous output tree and creates a fresh root.
pub fn reset_output_root(path: &Path) -> Result<(), AppError> {
    match fs::remove_dir_all(path) {
        Ok(()) => log::info!("Removed previous output tree at {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(path)?;
    log::debug!("Created output root {}", path.display());
    Ok(())
}

/// Reads a page's staged artifact.
///
/// A missing artifact is reported as [`AppError::StagedArtifactMissing`]
/// so the projector can log it with the page identity.
pub fn read_staged(path: &Path, page_name: &str) -> Result<Vec<u8>, AppError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::StagedArtifactMissing {
                name: page_name.to_string(),
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes a page's bytes, creating the containing directory on demand.
pub fn write_page_bytes(path: &Path, bytes: &[u8]) -> Result<usize, AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, bytes)?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}
