// src/manifest/parser.rs
//! Recursive-descent decoder from the export manifest to the page tree.
//!
//! The manifest encodes the space hierarchy as nested lists: each list
//! wraps a single item, the item carries the page anchor, and any
//! nested lists directly under the item are its subsections. Structure
//! violations are fatal; the run never starts on a tree it only half
//! understands.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dom::{self, Element};
use crate::error::ManifestError;
use crate::model::PageNode;
use crate::types::{PageId, SourceRef};

/// The trailing segment of a page reference: a decimal page id followed
/// by exactly one extension, e.g. `12345.html`.
static REFERENCE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.([A-Za-z0-9]+)$").expect("invalid reference suffix regex"));

/// Decode an export manifest into the page tree.
///
/// Returns the root page (the space landing page); its children are the
/// top-level sections. The manifest must contain exactly one top-level
/// list.
pub fn parse_export_index(html: &str) -> Result<PageNode, ManifestError> {
    let document = dom::parse_document(html)?;

    let mut lists = Vec::new();
    collect_outermost_lists(&document, &mut lists);
    let root_list = match lists.as_slice() {
        [single] => *single,
        [] => {
            return Err(ManifestError::Structure(
                "manifest contains no page list".to_string(),
            ))
        }
        found => {
            return Err(ManifestError::Structure(format!(
                "manifest contains {} top-level lists, expected exactly one",
                found.len()
            )))
        }
    };

    let item = single_item(root_list)?;
    let (title, source_ref, id) = decode_anchor(item)?;

    // The landing page itself is never projected, so top-level sections
    // take ordinals from 1.
    let sections: Vec<&Element> = item.children_with_tag("ul").collect();
    let name = format!("1. {title}");
    if sections.is_empty() {
        return Ok(PageNode::Leaf {
            name,
            id,
            source_ref,
        });
    }

    let children = sections
        .iter()
        .enumerate()
        .map(|(position, list)| parse_list(list, position + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageNode::Section {
        name,
        id,
        source_ref,
        children,
    })
}

/// Decode one list element into a page, decorated with the ordinal it
/// occupies among its projected siblings.
fn parse_list(list: &Element, ordinal: usize) -> Result<PageNode, ManifestError> {
    let item = single_item(list)?;
    let (title, source_ref, id) = decode_anchor(item)?;

    // Ordinal 1 under every section belongs to the section's own index
    // document, so real children start at 2.
    let sublists: Vec<&Element> = item.children_with_tag("ul").collect();
    let name = format!("{ordinal}. {title}");
    if sublists.is_empty() {
        return Ok(PageNode::Leaf {
            name,
            id,
            source_ref,
        });
    }

    let children = sublists
        .iter()
        .enumerate()
        .map(|(position, sublist)| parse_list(sublist, position + 2))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageNode::Section {
        name,
        id,
        source_ref,
        children,
    })
}

/// Every list wraps exactly one item element.
fn single_item(list: &Element) -> Result<&Element, ManifestError> {
    let items: Vec<&Element> = list.children_with_tag("li").collect();
    match items.as_slice() {
        [single] => Ok(*single),
        found => Err(ManifestError::Structure(format!(
            "list wraps {} item elements, expected exactly one",
            found.len()
        ))),
    }
}

/// Pull title, source reference and derived id out of an item's anchor.
fn decode_anchor(item: &Element) -> Result<(String, SourceRef, PageId), ManifestError> {
    let anchor = item.first_descendant("a").ok_or_else(|| {
        ManifestError::Structure("list item carries no anchor element".to_string())
    })?;

    let href = anchor.attr("href").ok_or_else(|| {
        ManifestError::Structure("page anchor carries no href attribute".to_string())
    })?;

    let title = anchor.inner_text();
    let title = title.trim();
    if title.is_empty() {
        return Err(ManifestError::EmptyTitle {
            href: href.to_string(),
        });
    }

    let id = derive_page_id(href)?;
    Ok((title.to_string(), SourceRef::new(href), id))
}

/// Derive the remote page id from a source reference.
///
/// The export names every page artifact `{title-slug}_{pageId}.{ext}`;
/// the id is the final `_`-delimited segment with the extension
/// stripped. References that deviate from that scheme (no underscore,
/// no extension, several dots, non-numeric id) are refused.
pub fn derive_page_id(source_ref: &str) -> Result<PageId, ManifestError> {
    let malformed = |reason: &str| ManifestError::MalformedReference {
        href: source_ref.to_string(),
        reason: reason.to_string(),
    };

    let (_, suffix) = source_ref
        .rsplit_once('_')
        .ok_or_else(|| malformed("no '_' separator before the page id"))?;

    let captures = REFERENCE_SUFFIX
        .captures(suffix)
        .ok_or_else(|| malformed("expected '<digits>.<extension>' after the last '_'"))?;

    PageId::parse(&captures[1]).map_err(|e| malformed(&e.to_string()))
}

fn collect_outermost_lists<'a>(element: &'a Element, lists: &mut Vec<&'a Element>) {
    for child in &element.children {
        if child.tag == "ul" {
            lists.push(child);
        } else {
            collect_outermost_lists(child, lists);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL_EXPORT: &str = r#"
        <html><head><meta charset="utf-8"><title>Demo</title></head><body>
        <div id="content">
        <ul>
          <li><a href="index_1000.html">Demo Space</a>
            <ul>
              <li><a href="Guides_1001.html">Guides</a>
                <ul><li><a href="Install_1002.html">Install</a></li></ul>
                <ul><li><a href="Upgrade_1003.html">Upgrade</a></li></ul>
              </li>
            </ul>
            <ul>
              <li><a href="FAQ_1004.html">FAQ</a></li>
            </ul>
          </li>
        </ul>
        </div>
        </body></html>"#;

    #[test]
    fn decodes_hierarchy_with_sibling_ordinals() {
        let root = parse_export_index(SMALL_EXPORT).expect("manifest should parse");

        assert_eq!(root.name(), "1. Demo Space");
        assert_eq!(root.id().as_str(), "1000");

        let sections = root.children();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name(), "1. Guides");
        assert_eq!(sections[1].name(), "2. FAQ");
        assert!(sections[1].is_leaf());

        let guides = sections[0].children();
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].name(), "2. Install");
        assert_eq!(guides[1].name(), "3. Upgrade");
        assert!(guides.iter().all(PageNode::is_leaf));
    }

    #[test]
    fn leafness_matches_absence_of_nested_lists() {
        let root = parse_export_index(SMALL_EXPORT).unwrap();
        let sections = root.children();
        assert!(!sections[0].is_leaf());
        assert!(sections[1].is_leaf());
    }

    #[test]
    fn two_top_level_lists_are_refused() {
        let manifest = r#"<body>
            <ul><li><a href="a_1.html">A</a></li></ul>
            <ul><li><a href="b_2.html">B</a></li></ul>
        </body>"#;
        let err = parse_export_index(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Structure(_)));
    }

    #[test]
    fn list_with_several_items_is_refused() {
        let manifest = r#"<ul>
            <li><a href="a_1.html">A</a></li>
            <li><a href="b_2.html">B</a></li>
        </ul>"#;
        let err = parse_export_index(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::Structure(_)));
    }

    #[test]
    fn empty_title_is_refused() {
        let manifest = r#"<ul><li><a href="a_1.html">   </a></li></ul>"#;
        let err = parse_export_index(manifest).unwrap_err();
        assert!(matches!(err, ManifestError::EmptyTitle { .. }));
    }

    #[test]
    fn derive_page_id_takes_the_numeric_suffix() {
        let id = derive_page_id("some/dir/pages_12345.html").unwrap();
        assert_eq!(id.as_str(), "12345");
    }

    #[test]
    fn derive_page_id_is_deterministic() {
        let first = derive_page_id("Getting-Started_98765.html").unwrap();
        let second = derive_page_id("Getting-Started_98765.html").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn derive_page_id_refuses_references_without_separator() {
        let err = derive_page_id("index.html").unwrap_err();
        assert!(matches!(err, ManifestError::MalformedReference { .. }));
    }

    #[test]
    fn derive_page_id_refuses_missing_or_multiple_extensions() {
        assert!(derive_page_id("pages_12345").is_err());
        assert!(derive_page_id("pages_12345.html.bak").is_err());
    }

    #[test]
    fn derive_page_id_refuses_non_numeric_ids() {
        assert!(derive_page_id("pages_final.html").is_err());
    }
}
