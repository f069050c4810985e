// src/main.rs

// Modules defined in the crate
mod api;
mod config;
mod constants;
mod error;
mod manifest;
mod model;
mod output;
mod pipeline;
mod types;

// Specific imports
use crate::api::{ExportHttpClient, PageDownloader, StagingReport};
use crate::config::{CommandLineInput, MirrorConfig};
use crate::error::{AppError, ManifestError};
use crate::model::PageNode;
use crate::output::{ProjectionReport, Projector};
use crate::pipeline::{ArtifactStaging, ManifestSource, TreeProjection};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("confmirror.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the mirror pipeline: decode manifest → stage (optional) → project.
async fn execute_pipeline(config: &MirrorConfig) -> Result<(), AppError> {
    let mirror = SpaceMirror::new(config);

    let root = mirror.load_tree()?;
    log::info!(
        "Decoded manifest: {} pages, nesting depth {}",
        root.page_count(),
        root.depth()
    );

    if config.print_tree {
        println!(
            "{}",
            serde_json::to_string_pretty(&root).map_err(|e| AppError::InternalError {
                message: format!("cannot render page tree: {}", e),
            })?
        );
    }

    if config.fetch.is_some() {
        let staging = mirror.stage(&root).await?;
        mirror.report_staging(&staging);
    }

    let report = mirror.project(&root)?;
    mirror.report_completion(&report);

    Ok(())
}

/// Orchestrates the decoding, staging and projection of a space export.
struct SpaceMirror<'a> {
    config: &'a MirrorConfig,
}

impl<'a> SpaceMirror<'a> {
    fn new(config: &'a MirrorConfig) -> Self {
        Self { config }
    }

    /// Reports staging results to the user.
    fn report_staging(&self, staging: &StagingReport) {
        println!(
            "📄 Staged {} pages ({} bytes).",
            staging.pages_staged, staging.bytes_staged
        );
        if !staging.is_clean() {
            eprintln!("⚠️  {} pages could not be staged:", staging.failed.len());
            for failed in &staging.failed {
                eprintln!("    '{}' (id {}): {}", failed.name, failed.id, failed.reason);
            }
        }
    }

    /// Reports projection results to the user.
    fn report_completion(&self, report: &ProjectionReport) {
        println!(
            "📄 Mirrored {} pages to {} ({} bytes).",
            report.stats.pages_written,
            self.config.output_dir.display(),
            report.stats.bytes_written
        );

        if !report.is_clean() {
            eprintln!("⚠️  {} pages were skipped:", report.skipped.len());
            for skipped in &report.skipped {
                eprintln!("    '{}' (id {}): {}", skipped.name, skipped.id, skipped.reason);
            }
        }

        println!("✓ Export mirror complete.");
    }
}

impl ManifestSource for SpaceMirror<'_> {
    fn load_tree(&self) -> Result<PageNode, AppError> {
        log::info!("Reading manifest at {}", self.config.manifest_path.display());

        let markup =
            fs::read_to_string(&self.config.manifest_path).map_err(|e| {
                ManifestError::Unreadable {
                    path: self.config.manifest_path.clone(),
                    source: e,
                }
            })?;

        Ok(manifest::parse_export_index(&markup)?)
    }
}

#[async_trait::async_trait]
impl ArtifactStaging for SpaceMirror<'_> {
    async fn stage(&self, root: &PageNode) -> Result<StagingReport, AppError> {
        let fetch = self.config.fetch.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration("staging requested without fetch settings".to_string())
        })?;

        log::info!("Fetching pages from {}", fetch.base_url);
        let client = ExportHttpClient::new(fetch.base_url.clone(), &fetch.cookie)?;
        let downloader = PageDownloader::new(
            Arc::new(client),
            &self.config.staging_dir,
            self.config.artifact_ext.as_str(),
        );

        downloader.stage_pages(root.children()).await
    }
}

impl TreeProjection for SpaceMirror<'_> {
    fn project(&self, root: &PageNode) -> Result<ProjectionReport, AppError> {
        let projector = Projector::new(
            &self.config.staging_dir,
            &self.config.output_dir,
            self.config.artifact_ext.as_str(),
        );

        projector.project(root.children())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = MirrorConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
