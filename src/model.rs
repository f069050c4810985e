// src/model.rs
//! The in-memory page tree decoded from an export manifest.
//!
//! A [`PageNode`] is either a [`PageNode::Leaf`] carrying downloadable
//! content or a [`PageNode::Section`] with ordered children. The tree
//! is built once per run by the manifest parser and read-only
//! afterward; the only derived shapes are the pure sequences produced
//! for projection and staging.

use crate::types::{PageId, SourceRef};
use serde::{Deserialize, Serialize};

/// One entry in the exported page hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageNode {
    /// A page without subsections; leaves are the only nodes whose
    /// binary content is persisted directly.
    Leaf {
        /// Human-readable title decorated with the page's 1-based
        /// position among its projected siblings, e.g.
        /// `"2. Getting Started"`. The prefix keeps filesystem ordering
        /// stable and sibling names distinct by construction.
        name: String,
        /// Remote fetch key derived from the source reference.
        id: PageId,
        /// The artifact reference as written in the manifest.
        source_ref: SourceRef,
    },
    /// A page with subsections, in source document order.
    Section {
        name: String,
        id: PageId,
        source_ref: SourceRef,
        children: Vec<PageNode>,
    },
}

impl PageNode {
    pub fn name(&self) -> &str {
        match self {
            PageNode::Leaf { name, .. } | PageNode::Section { name, .. } => name,
        }
    }

    pub fn id(&self) -> &PageId {
        match self {
            PageNode::Leaf { id, .. } | PageNode::Section { id, .. } => id,
        }
    }

    pub fn source_ref(&self) -> &SourceRef {
        match self {
            PageNode::Leaf { source_ref, .. } | PageNode::Section { source_ref, .. } => source_ref,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, PageNode::Leaf { .. })
    }

    /// The node's children; empty for a leaf.
    pub fn children(&self) -> &[PageNode] {
        match self {
            PageNode::Leaf { .. } => &[],
            PageNode::Section { children, .. } => children,
        }
    }

    /// A leaf copy of this node — the section's own landing document.
    pub fn as_index_leaf(&self) -> PageNode {
        PageNode::Leaf {
            name: self.name().to_string(),
            id: self.id().clone(),
            source_ref: self.source_ref().clone(),
        }
    }

    /// The sequence a section projects as: the section's index leaf
    /// followed by its real children, in order. Pure; the tree is never
    /// mutated.
    pub fn with_index_page(&self) -> Vec<PageNode> {
        let mut sequence = Vec::with_capacity(1 + self.children().len());
        sequence.push(self.as_index_leaf());
        sequence.extend(self.children().iter().cloned());
        sequence
    }

    /// All pages of this subtree in document order, the node itself first.
    pub fn preorder(&self) -> Vec<&PageNode> {
        let mut pages = Vec::new();
        self.collect_preorder(&mut pages);
        pages
    }

    fn collect_preorder<'a>(&'a self, pages: &mut Vec<&'a PageNode>) {
        pages.push(self);
        for child in self.children() {
            child.collect_preorder(pages);
        }
    }

    /// Number of pages in this subtree, the node itself included.
    pub fn page_count(&self) -> usize {
        1 + self.children().iter().map(PageNode::page_count).sum::<usize>()
    }

    /// Deepest nesting level below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, id: &str, href: &str) -> PageNode {
        PageNode::Leaf {
            name: name.to_string(),
            id: PageId::parse(id).expect("test id should be numeric"),
            source_ref: SourceRef::new(href),
        }
    }

    fn section(name: &str, id: &str, href: &str, children: Vec<PageNode>) -> PageNode {
        PageNode::Section {
            name: name.to_string(),
            id: PageId::parse(id).expect("test id should be numeric"),
            source_ref: SourceRef::new(href),
            children,
        }
    }

    #[test]
    fn with_index_page_puts_the_index_leaf_first() {
        let node = section(
            "1. Guides",
            "100",
            "Guides_100.html",
            vec![
                leaf("2. Install", "101", "Install_101.html"),
                leaf("3. Upgrade", "102", "Upgrade_102.html"),
            ],
        );

        let sequence = node.with_index_page();

        assert_eq!(sequence.len(), 3);
        assert!(sequence[0].is_leaf());
        assert_eq!(sequence[0].name(), "1. Guides");
        assert_eq!(sequence[0].id(), node.id());
        assert_eq!(sequence[1].name(), "2. Install");
        assert_eq!(sequence[2].name(), "3. Upgrade");
    }

    #[test]
    fn with_index_page_on_leaf_is_a_singleton() {
        let node = leaf("1. Readme", "7", "Readme_7.html");
        let sequence = node.with_index_page();
        assert_eq!(sequence, vec![node]);
    }

    #[test]
    fn preorder_follows_document_order() {
        let tree = section(
            "1. Root",
            "1",
            "Root_1.html",
            vec![
                section(
                    "2. A",
                    "2",
                    "A_2.html",
                    vec![leaf("2. A1", "3", "A1_3.html")],
                ),
                leaf("3. B", "4", "B_4.html"),
            ],
        );

        let names: Vec<&str> = tree.preorder().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["1. Root", "2. A", "2. A1", "3. B"]);
        assert_eq!(tree.page_count(), 4);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn tree_serializes_with_tagged_variants() {
        let json = serde_json::to_value(&leaf("1. A", "5", "A_5.html")).unwrap();
        assert_eq!(json["kind"], "leaf");
        assert_eq!(json["name"], "1. A");
    }
}
