// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how an export mirror run operates: where the manifest lives, what the
//! staged artifacts look like, how the remote endpoint is addressed.

// ---------------------------------------------------------------------------
// Export layout
// ---------------------------------------------------------------------------

/// Name of the table-of-contents document inside a Confluence HTML export.
///
/// The export always places its nested-list manifest at the root of the
/// export directory under this name.
pub const EXPORT_MANIFEST_FILENAME: &str = "index.html";

/// Extension given to staged page artifacts, without the leading dot.
///
/// The Word export endpoint serves documents without a meaningful
/// content-disposition, so the extension is fixed on our side and used
/// consistently by both the downloader and the projector.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "doc";

// ---------------------------------------------------------------------------
// Remote endpoint
// ---------------------------------------------------------------------------

/// Path of the per-page Word export endpoint, relative to the wiki base URL.
///
/// A page's Word rendition is fetched from `{base}/exportword?pageId={id}`.
pub const WORD_EXPORT_PATH: &str = "exportword";

/// Environment variable holding the static Confluence session cookie.
///
/// The credential is a copied browser cookie, never refreshed or renewed
/// by this tool. Only required when live fetching is enabled.
pub const SESSION_COOKIE_ENV: &str = "CONFLUENCE_SESSION_COOKIE";

// ---------------------------------------------------------------------------
// Filesystem naming
// ---------------------------------------------------------------------------

/// Maximum length, in characters, of a single directory or file name
/// segment derived from a page title.
///
/// Confluence does not bound title length; most filesystems bound name
/// length at 255 bytes. 100 characters keeps full mirrored paths usable.
pub const MAX_SEGMENT_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
