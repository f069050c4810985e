// src/config.rs
use crate::constants::{
    DEFAULT_ARTIFACT_EXTENSION, EXPORT_MANIFEST_FILENAME, SESSION_COOKIE_ENV,
};
use crate::error::AppError;
use crate::types::{BaseUrl, SessionCookie, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Parsed and validated command-line input.
///
/// Every flag is optional; the bare invocation mirrors a local export
/// in the default layout without fetching anything.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Directory holding the Confluence HTML export (its index.html is the manifest)
    #[arg(long, default_value = "confluence-export")]
    pub export_dir: String,

    /// Directory where per-page Word artifacts are staged
    #[arg(long, default_value = "downloaded-pages")]
    pub staging_dir: String,

    /// Output directory for the mirrored tree (removed and recreated each run)
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,

    /// File extension of staged artifacts, without the leading dot
    #[arg(long, default_value = DEFAULT_ARTIFACT_EXTENSION)]
    pub artifact_ext: String,

    /// Fetch pages from the wiki's Word export endpoint before projecting
    #[arg(long, default_value_t = false)]
    pub fetch: bool,

    /// Wiki base URL, e.g. "https://example.atlassian.net/wiki" (required with --fetch)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the parsed page tree as JSON before mirroring
    #[arg(long, default_value_t = false)]
    pub print_tree: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved mirror configuration — validated and ready to drive all
/// three stages.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub manifest_path: PathBuf,
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
    pub artifact_ext: String,
    /// Present only when live fetching was requested.
    pub fetch: Option<FetchConfig>,
    pub print_tree: bool,
    #[allow(dead_code)] // Used by bin crate
    pub verbose: bool,
}

/// Remote-endpoint settings for a fetching run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: BaseUrl,
    pub cookie: SessionCookie,
}

impl MirrorConfig {
    /// Resolves a complete mirror configuration from CLI input and
    /// environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let artifact_ext = validate_extension(cli.artifact_ext)?;

        let fetch = if cli.fetch {
            let raw_url = cli.base_url.ok_or_else(|| {
                AppError::MissingConfiguration("--base-url is required with --fetch".to_string())
            })?;
            let base_url = BaseUrl::parse(&raw_url)?;

            let cookie_value = std::env::var(SESSION_COOKIE_ENV).map_err(|_| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set",
                    SESSION_COOKIE_ENV
                ))
            })?;
            let cookie = SessionCookie::new(cookie_value)?;

            Some(FetchConfig { base_url, cookie })
        } else {
            None
        };

        Ok(MirrorConfig {
            manifest_path: PathBuf::from(cli.export_dir).join(EXPORT_MANIFEST_FILENAME),
            staging_dir: PathBuf::from(cli.staging_dir),
            output_dir: PathBuf::from(cli.output_dir),
            artifact_ext,
            fetch,
            print_tree: cli.print_tree,
            verbose: cli.verbose,
        })
    }
}

/// Normalizes and validates the artifact extension.
fn validate_extension(raw: String) -> Result<String, ValidationError> {
    let ext = raw.trim_start_matches('.').to_string();

    if ext.is_empty() {
        return Err(ValidationError::InvalidExtension {
            value: raw,
            reason: "extension cannot be empty".to_string(),
        });
    }

    if !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidExtension {
            value: raw,
            reason: "extension must be alphanumeric".to_string(),
        });
    }

    Ok(ext)
}
