// src/output/paths.rs
//! Pure functions for path calculations and filename generation.
//!
//! This module handles all path-related operations without performing
//! any I/O.

use crate::constants::MAX_SEGMENT_LENGTH;
use crate::types::SourceRef;
use std::path::{Path, PathBuf};

/// Sanitizes a page name for use as a single path segment.
///
/// Page names become directory and file names, so they must not carry
/// path separators or control characters.
pub fn sanitize_segment(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    safe_name = safe_name.trim().trim_matches('.').to_string();

    // Limit length
    if safe_name.chars().count() > MAX_SEGMENT_LENGTH {
        safe_name = safe_name.chars().take(MAX_SEGMENT_LENGTH).collect();
    }

    // Default if empty
    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

/// The staged-artifact stem of a source reference: its base filename
/// with the extension stripped.
pub fn artifact_stem(source_ref: &SourceRef) -> &str {
    let reference = source_ref.as_str();
    let base = match reference.rfind('/') {
        Some(separator) => &reference[separator + 1..],
        None => reference,
    };
    match base.find('.') {
        Some(dot) => &base[..dot],
        None => base,
    }
}

/// Where a page's staged artifact is expected on disk.
pub fn staged_artifact_path(staging_dir: &Path, source_ref: &SourceRef, extension: &str) -> PathBuf {
    staging_dir.join(format!("{}.{}", artifact_stem(source_ref), extension))
}

/// Where a leaf page is written inside the output tree.
pub fn leaf_destination(base: &Path, name: &str, extension: &str) -> PathBuf {
    base.join(format!("{}.{}", sanitize_segment(name), extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_replaces_separators_and_controls() {
        assert_eq!(sanitize_segment("Ops/Prod"), "Ops_Prod");
        assert_eq!(sanitize_segment("A:B*C?D"), "A_B_C_D");
        assert_eq!(sanitize_segment("  spaced  "), "spaced");
        assert_eq!(sanitize_segment(""), "unnamed");
    }

    #[test]
    fn sanitize_keeps_ordinal_prefixes() {
        assert_eq!(sanitize_segment("2. Getting Started"), "2. Getting Started");
    }

    #[test]
    fn artifact_stem_strips_directories_and_extension() {
        assert_eq!(artifact_stem(&SourceRef::new("Guides_1001.html")), "Guides_1001");
        assert_eq!(artifact_stem(&SourceRef::new("sub/Guides_1001.html")), "Guides_1001");
        assert_eq!(artifact_stem(&SourceRef::new("NoExtension_7")), "NoExtension_7");
    }

    #[test]
    fn staged_and_destination_paths_carry_the_extension() {
        let staged = staged_artifact_path(Path::new("staged"), &SourceRef::new("A_1.html"), "doc");
        assert_eq!(staged, Path::new("staged/A_1.doc"));

        let dest = leaf_destination(Path::new("output/1. S"), "2. Leaf", "doc");
        assert_eq!(dest, Path::new("output/1. S/2. Leaf.doc"));
    }
}
