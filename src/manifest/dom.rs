// src/manifest/dom.rs
//! Minimal element tree over the manifest markup.
//!
//! The tree decoder never touches quick-xml directly; it works against
//! [`Element`] and its find-child-by-tag / get-attribute / get-text
//! queries. HTML named entities are converted to Unicode up front and
//! void elements are treated as childless, so the event walk survives
//! the export's HTML-flavoured markup.

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use std::borrow::Cow;

use crate::error::ManifestError;

/// HTML elements that never have closing tags. Treated as empty so an
/// unclosed `<br>` or `<meta>` cannot swallow its siblings.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Regex pattern for matching named HTML entities.
static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// One markup element: tag, attributes, child elements and the text
/// written directly inside it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Value of the named attribute, if present. Names are matched
    /// case-insensitively; they were lowercased at parse time.
    pub fn attr(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements carrying the given tag, in document order.
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// First element with the given tag anywhere below this one,
    /// depth-first in document order. Does not match the element itself.
    pub fn first_descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.first_descendant(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated text of this element and its whole subtree.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Parse a markup document into an element tree.
///
/// The returned element is a synthetic `root` wrapping the document, so
/// callers always get exactly one element to query regardless of how
/// many top-level elements the markup has.
pub fn parse_document(html: &str) -> Result<Element, ManifestError> {
    let html = convert_html_entities(html);
    let wrapped = format!("<root>{html}</root>");

    let mut reader = Reader::from_reader(wrapped.as_bytes());
    reader.config_mut().trim_text(false);
    // Void elements and stray end tags are handled by parse_children, so
    // quick-xml must not reject mismatched end tags before we see them.
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"root" => break,
            Event::Eof => return Err(ManifestError::Structure("empty document".to_string())),
            _ => {}
        }
        buf.clear();
    }

    let mut root = Element {
        tag: "root".to_string(),
        ..Element::default()
    };
    parse_children(&mut reader, &mut root, "root")?;
    Ok(root)
}

/// Fill `node` with children and text until the matching end tag.
///
/// Stray end tags from unclosed HTML elements are skipped rather than
/// treated as errors.
fn parse_children(
    reader: &mut Reader<&[u8]>,
    node: &mut Element,
    parent_tag: &str,
) -> Result<(), ManifestError> {
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut child = Element {
                    tag: decode_tag(reader, e.name().as_ref()),
                    attrs: decode_attrs(&e),
                    ..Element::default()
                };
                if is_void_element(&child.tag) {
                    node.children.push(child);
                } else {
                    let tag = child.tag.clone();
                    parse_children(reader, &mut child, &tag)?;
                    node.children.push(child);
                }
            }
            Event::Empty(e) => {
                node.children.push(Element {
                    tag: decode_tag(reader, e.name().as_ref()),
                    attrs: decode_attrs(&e),
                    ..Element::default()
                });
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                node.text.push_str(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                node.text.push_str(&resolve_entity(&entity));
            }
            Event::CData(e) => {
                node.text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if decode_tag(reader, e.name().as_ref()) == parent_tag {
                    return Ok(());
                }
                // Stray end tag of an element already closed implicitly.
            }
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn decode_tag(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            Cow::into_owned,
        )
        .to_ascii_lowercase()
}

fn decode_attrs(e: &BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                Cow::into_owned,
            );
            (key, value)
        })
        .collect()
}

/// Convert named HTML entities to Unicode characters.
///
/// Standard XML entities (amp, lt, gt, quot, apos) are left for the XML
/// parser; everything else would make it fail.
fn convert_html_entities(html: &str) -> String {
    ENTITY_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            let entity_name = &caps[1];
            entity_to_unicode(entity_name)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Map an HTML entity name to its Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "deg" => "\u{00b0}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        _ => return None,
    })
}

/// Resolve an entity reference the XML parser reported as-is.
fn resolve_entity(name: &str) -> String {
    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        hex if hex.starts_with("#x") || hex.starts_with("#X") => u32::from_str_radix(&hex[2..], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default(),
        dec if dec.starts_with('#') => dec[1..]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default(),
        other => format!("&{other};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_elements_with_attributes() {
        let doc = parse_document(r#"<ul><li><a href="Page_1.html">Title</a></li></ul>"#)
            .expect("well-formed markup should parse");

        let ul = &doc.children[0];
        assert_eq!(ul.tag, "ul");
        let li = &ul.children[0];
        assert_eq!(li.tag, "li");
        let a = &li.children[0];
        assert_eq!(a.attr("href"), Some("Page_1.html"));
        assert_eq!(a.inner_text(), "Title");
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = parse_document(r#"<li><img src="x.png"><a href="A_1.html">A</a></li>"#)
            .expect("void elements should be tolerated");

        let li = &doc.children[0];
        let tags: Vec<&str> = li.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["img", "a"]);
    }

    #[test]
    fn html_entities_become_unicode_text() {
        let doc = parse_document("<p>Getting&nbsp;Started &amp; More</p>").unwrap();
        assert_eq!(doc.children[0].inner_text(), "Getting\u{00a0}Started & More");
    }

    #[test]
    fn tags_and_attribute_names_are_lowercased() {
        let doc = parse_document(r#"<UL><LI><A HREF="B_2.html">B</A></LI></UL>"#).unwrap();
        let a = doc.children[0].first_descendant("a").expect("anchor");
        assert_eq!(a.attr("href"), Some("B_2.html"));
    }

    #[test]
    fn first_descendant_is_depth_first() {
        let doc = parse_document(r#"<li><span><a href="inner.html">x</a></span><a href="outer.html">y</a></li>"#)
            .unwrap();
        let li = &doc.children[0];
        assert_eq!(li.first_descendant("a").unwrap().attr("href"), Some("inner.html"));
    }

    #[test]
    fn stray_end_tags_are_skipped() {
        let doc = parse_document("<div><ul><li>x</li></ul></span></div>")
            .expect("implicitly closed elements should not break the walk");
        assert_eq!(doc.children[0].children[0].tag, "ul");
    }
}
