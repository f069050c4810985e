// tests/artifact_staging.rs
//! Staging pass behavior with a stubbed page source: document-order
//! walk, per-page failure isolation, staged artifact naming.

use confmirror::{AppError, PageDownloader, PageId, PageNode, PageSource, SourceRef};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// In-memory page source: serves `doc:{id}` bytes and records fetch
/// order; ids in `failing` always error.
struct StubPageSource {
    failing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl StubPageSource {
    fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|id| id.to_string()).collect(),
            fetched: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl PageSource for StubPageSource {
    async fn fetch_page(&self, id: &PageId) -> Result<Vec<u8>, AppError> {
        self.fetched.lock().unwrap().push(id.as_str().to_string());
        if self.failing.contains(id.as_str()) {
            return Err(AppError::InternalError {
                message: format!("stub refuses page {id}"),
            });
        }
        Ok(format!("doc:{id}").into_bytes())
    }
}

fn leaf(name: &str, id: &str, href: &str) -> PageNode {
    PageNode::Leaf {
        name: name.to_string(),
        id: PageId::parse(id).expect("numeric test id"),
        source_ref: SourceRef::new(href),
    }
}

fn section(name: &str, id: &str, href: &str, children: Vec<PageNode>) -> PageNode {
    PageNode::Section {
        name: name.to_string(),
        id: PageId::parse(id).expect("numeric test id"),
        source_ref: SourceRef::new(href),
        children,
    }
}

fn demo_sections() -> Vec<PageNode> {
    vec![
        section(
            "1. Guides",
            "10",
            "Guides_10.html",
            vec![
                leaf("2. Install", "11", "Install_11.html"),
                leaf("3. Upgrade", "12", "Upgrade_12.html"),
            ],
        ),
        leaf("2. FAQ", "13", "FAQ_13.html"),
    ]
}

#[tokio::test]
async fn stages_every_page_in_document_order() {
    let staging = TempDir::new().unwrap();
    let source = Arc::new(StubPageSource::new(&[]));
    let downloader = PageDownloader::new(source.clone(), staging.path(), "doc");

    let report = downloader.stage_pages(&demo_sections()).await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.pages_staged, 4);
    assert_eq!(
        *source.fetched.lock().unwrap(),
        vec!["10", "11", "12", "13"]
    );

    // Sections are staged too: their landing document becomes the
    // projected index copy.
    for stem in ["Guides_10", "Install_11", "Upgrade_12", "FAQ_13"] {
        let path = staging.path().join(format!("{stem}.doc"));
        assert!(path.is_file(), "missing staged artifact {stem}");
    }
    assert_eq!(
        fs::read(staging.path().join("Install_11.doc")).unwrap(),
        b"doc:11"
    );
}

#[tokio::test]
async fn a_failing_page_does_not_stop_the_walk() {
    let staging = TempDir::new().unwrap();
    let source = Arc::new(StubPageSource::new(&["11"]));
    let downloader = PageDownloader::new(source.clone(), staging.path(), "doc");

    let report = downloader.stage_pages(&demo_sections()).await.unwrap();

    assert_eq!(report.pages_staged, 3);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id.as_str(), "11");
    assert_eq!(report.failed[0].name, "2. Install");

    // The failed page was attempted, and everything after it was still fetched.
    assert_eq!(
        *source.fetched.lock().unwrap(),
        vec!["10", "11", "12", "13"]
    );
    assert!(!staging.path().join("Install_11.doc").exists());
    assert!(staging.path().join("Upgrade_12.doc").is_file());
}
